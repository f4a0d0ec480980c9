//! Loading view shown while a lookup sequence is in flight.

use dioxus::prelude::*;

/// Full-screen loading state with the session's progress text.
#[component]
pub fn LoadingView(status: String) -> Element {
    rsx! {
        div {
            class: "flex-1 flex flex-col items-center justify-center p-10 text-center",
            div {
                class: "flex space-x-2 mb-6",
                div { class: "w-3 h-3 bg-blue-500 rounded-full animate-bounce" }
                div { class: "w-3 h-3 bg-blue-500 rounded-full animate-bounce", style: "animation-delay: 0.1s" }
                div { class: "w-3 h-3 bg-blue-500 rounded-full animate-bounce", style: "animation-delay: 0.2s" }
            }
            h3 { class: "text-xl font-bold text-gray-800 mb-2", "{status}" }
            p { class: "text-gray-500", "Comparing prices across retailers..." }
        }
    }
}
