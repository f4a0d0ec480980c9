//! Root application component.
//!
//! Owns the search session and sequences the two lookup flows: a text
//! search is a single pricing call; a scan is the strict two-step pipeline
//! identify -> price, with the identified name feeding the second call and
//! each step carrying its own failure origin.

use dioxus::prelude::*;

use crate::components::{ErrorView, LoadingView, ResultsView, Scanner};
use crate::server_fns::{identify_product, search_prices};
use crate::session::{FailureOrigin, Phase, SearchSession};

/// Root application component
#[component]
pub fn App() -> Element {
    let mut session = use_signal(SearchSession::new);
    let mut query = use_signal(String::new);

    let phase = session.read().phase();
    let status = session.read().status().to_string();
    let summary = session.read().summary().cloned();
    let error_message = session
        .read()
        .error_message()
        .unwrap_or("Something went wrong.")
        .to_string();

    rsx! {
        // Global styles
        document::Stylesheet { href: asset!("/assets/tailwind.css") }

        div {
            class: "min-h-screen max-w-md mx-auto bg-white shadow-xl relative overflow-hidden flex flex-col",

            // Header
            header {
                class: "px-6 py-4 flex items-center justify-between border-b bg-white sticky top-0 z-20",
                div {
                    class: "flex items-center gap-2 cursor-pointer",
                    onclick: move |_| reset(session, query),
                    div {
                        class: "bg-blue-600 w-8 h-8 rounded-lg flex items-center justify-center text-white text-sm",
                        "\u{1F50D}"
                    }
                    h1 {
                        class: "font-bold text-xl tracking-tight text-gray-900",
                        "PriceLens"
                    }
                }
            }

            // Content area, one view per phase
            main {
                class: "flex-1 flex flex-col overflow-y-auto",

                if phase == Phase::Idle || phase == Phase::Scanning {
                    div {
                        class: "px-6 py-8 flex-1 flex flex-col items-center justify-center text-center",
                        h2 {
                            class: "text-2xl font-bold text-gray-800 mb-2",
                            "Save on every purchase"
                        }
                        p {
                            class: "text-gray-500 mb-8 max-w-[280px]",
                            "Scan a product or search to compare prices across top retailers instantly."
                        }

                        div {
                            class: "w-full space-y-4",
                            input {
                                r#type: "text",
                                placeholder: "Search product name or SKU",
                                class: "w-full px-4 py-4 bg-gray-50 border border-gray-200 rounded-2xl focus:outline-none focus:ring-2 focus:ring-blue-500/20 text-lg",
                                value: "{query}",
                                oninput: move |e| query.set(e.value()),
                                onkeydown: move |e| {
                                    if e.key() == Key::Enter {
                                        start_text_search(session, query());
                                    }
                                },
                            }

                            div {
                                class: "flex gap-3",
                                button {
                                    class: "flex-1 bg-gray-900 text-white py-4 rounded-2xl font-semibold active:scale-95 transition-transform",
                                    onclick: move |_| start_text_search(session, query()),
                                    "Search"
                                }
                                button {
                                    class: "w-16 bg-blue-600 text-white py-4 rounded-2xl flex items-center justify-center active:scale-95 transition-transform",
                                    onclick: move |_| {
                                        session.write().open_scanner();
                                    },
                                    "\u{2316}"
                                }
                            }
                        }
                    }
                }

                if phase == Phase::Searching {
                    LoadingView { status }
                }

                if phase == Phase::Results {
                    if let Some(summary) = summary {
                        ResultsView { summary, on_reset: move |_| reset(session, query) }
                    }
                }

                if phase == Phase::Error {
                    ErrorView { message: error_message, on_reset: move |_| reset(session, query) }
                }
            }

            // Scanner overlay; the camera stream lives only while this is mounted
            if phase == Phase::Scanning {
                Scanner {
                    on_capture: move |frame: String| start_scan_search(session, frame),
                    on_close: move |_| session.write().cancel_scan(),
                }
            }
        }
    }
}

/// Return to Idle, dropping the held summary, error, and query text.
fn reset(mut session: Signal<SearchSession>, mut query: Signal<String>) {
    session.write().reset();
    query.set(String::new());
}

/// Text flow: one pricing call.
fn start_text_search(mut session: Signal<SearchSession>, query: String) {
    if !session.write().submit_query(&query) {
        return;
    }
    let query = query.trim().to_string();

    spawn(async move {
        match search_prices(query).await {
            Ok(summary) => session.write().complete(summary),
            Err(err) => {
                tracing::warn!(error = %err, "Price search failed");
                session.write().fail(FailureOrigin::PriceLookup);
            }
        }
    });
}

/// Scan flow: identify the frame, then price the identified name.
fn start_scan_search(mut session: Signal<SearchSession>, image_base64: String) {
    if !session.write().begin_scan_lookup() {
        return;
    }

    spawn(async move {
        let name = match identify_product(image_base64).await {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(error = %err, "Product identification failed");
                session.write().fail(FailureOrigin::Identification);
                return;
            }
        };

        session.write().product_identified(&name);

        match search_prices(name).await {
            Ok(summary) => session.write().complete(summary),
            Err(err) => {
                tracing::warn!(error = %err, "Price search failed");
                session.write().fail(FailureOrigin::PriceLookup);
            }
        }
    });
}
