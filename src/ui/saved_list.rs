use dioxus::prelude::*;

use crate::app::AppState;
use crate::session::Action;

#[component]
pub fn SavedList() -> Element {
    let app_state = use_context::<AppState>();
    let state = app_state.snapshot.read().clone();

    if !state.list_visible {
        return rsx! {};
    }

    rsx! {
        div {
            class: "mt-5",
            h2 { class: "text-lg font-semibold mb-2", "Saved Quotes" }

            if state.saved.is_empty() {
                div { class: "text-sm opacity-50", "No saved quotes" }
            }

            {state.saved.into_iter().enumerate().map(|(index, quote)| {
                let app_state = app_state.clone();
                rsx! {
                    div {
                        key: "{index}",
                        class: "group flex flex-row items-center my-2",
                        div {
                            class: "flex-1",
                            p { class: "text-base", "{quote.content}" }
                            p { class: "text-sm italic opacity-60", "- {quote.author}" }
                        }
                        button {
                            class: "p-1 rounded-md",
                            title: "Delete quote",
                            onclick: move |_| app_state.dispatch(Action::Remove(index)),
                            "✕"
                        }
                    }
                }
            })}
        }
    }
}
