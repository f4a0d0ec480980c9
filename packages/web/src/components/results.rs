//! Results view: best price card plus the remaining retailer offers.

use dioxus::prelude::*;

use crate::types::ProductSummary;

/// Props for ResultsView
#[derive(Props, Clone, PartialEq)]
pub struct ResultsViewProps {
    pub summary: ProductSummary,
    pub on_reset: EventHandler<()>,
}

/// Results screen. Prices arrive pre-sorted with the cheapest first; an
/// empty list is a valid result and renders its own affordance.
#[component]
pub fn ResultsView(props: ResultsViewProps) -> Element {
    let on_reset = props.on_reset;
    let summary = &props.summary;

    rsx! {
        div {
            class: "px-6 py-6 space-y-6 bg-gray-50 min-h-full",

            button {
                class: "flex items-center gap-2 text-blue-600 font-medium mb-2",
                onclick: move |_| on_reset.call(()),
                "\u{2190} Back to search"
            }

            // Main product card
            div {
                class: "bg-white p-6 rounded-3xl shadow-sm border border-gray-100",
                div {
                    class: "flex gap-4 items-start mb-4",
                    if let Some(image) = &summary.image {
                        img {
                            class: "w-24 h-24 rounded-2xl border border-gray-100 object-contain p-2 flex-shrink-0",
                            src: "{image}",
                            alt: "{summary.name}",
                        }
                    }
                    div {
                        class: "flex-1",
                        h2 {
                            class: "text-lg font-bold text-gray-900 leading-tight mb-1",
                            "{summary.name}"
                        }
                        p {
                            class: "text-sm text-gray-500 line-clamp-2",
                            if let Some(description) = &summary.description {
                                "{description}"
                            } else {
                                "Found current prices from multiple online stores."
                            }
                        }
                    }
                }

                if let Some(best) = summary.prices.first() {
                    div {
                        class: "bg-blue-600 rounded-2xl p-4 flex items-center justify-between text-white",
                        div {
                            span {
                                class: "text-xs font-medium opacity-80 uppercase tracking-wider",
                                "Best Price"
                            }
                            div { class: "text-2xl font-black", "${best.price:.2}" }
                        }
                        div {
                            class: "text-right",
                            span { class: "text-xs opacity-80 block", "at {best.source}" }
                            a {
                                href: "{best.url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                class: "inline-block mt-1 bg-white text-blue-600 px-4 py-1.5 rounded-full text-sm font-bold",
                                "Buy Now"
                            }
                        }
                    }
                }
            }

            // Remaining retailers
            div {
                class: "space-y-3 pb-24",
                h3 { class: "font-bold text-gray-800 px-1", "Other Retailers" }

                for item in summary.prices.iter().skip(1) {
                    div {
                        class: "bg-white p-4 rounded-2xl border border-gray-200 flex items-center justify-between",
                        div {
                            h4 { class: "font-bold text-gray-900", "{item.source}" }
                            p { class: "text-xs text-gray-500 truncate max-w-[150px]", "{item.title}" }
                        }
                        div {
                            class: "text-right",
                            div { class: "text-lg font-bold text-gray-900", "${item.price:.2}" }
                            a {
                                href: "{item.url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                class: "text-xs text-blue-600 font-semibold",
                                "View Link"
                            }
                        }
                    }
                }

                if summary.prices.len() <= 1 {
                    div {
                        class: "p-8 text-center text-gray-400 italic",
                        "No other retailers found for this specific item."
                    }
                }
            }
        }
    }
}
