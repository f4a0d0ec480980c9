//! Error view with a single recovery action.

use dioxus::prelude::*;

/// Terminal error state; the only way out is a user-initiated reset.
#[component]
pub fn ErrorView(message: String, on_reset: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "flex-1 flex flex-col items-center justify-center p-10 text-center",
            div {
                class: "w-20 h-20 bg-red-50 rounded-full flex items-center justify-center mb-6 text-3xl",
                "\u{26A0}"
            }
            h3 { class: "text-xl font-bold text-gray-800 mb-2", "Something went wrong" }
            p { class: "text-gray-500 mb-8", "{message}" }
            button {
                class: "bg-gray-900 text-white px-8 py-3 rounded-2xl font-semibold",
                onclick: move |_| on_reset.call(()),
                "Try Again"
            }
        }
    }
}
