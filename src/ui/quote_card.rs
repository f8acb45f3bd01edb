//! Current quote with its action buttons

use crate::app::AppState;
use crate::session::share::tweet_intent_url;
use crate::session::Action;
use dioxus::prelude::*;

#[component]
pub fn QuoteCard() -> Element {
    let app_state = use_context::<AppState>();
    let state = app_state.snapshot.read().clone();
    let is_busy = app_state.is_busy();

    let text = state.current.text().to_string();
    let byline = state.current.byline();
    let tweet_url = state
        .current
        .as_quote()
        .map(|quote| tweet_intent_url(&quote.content))
        .unwrap_or_default();
    let error = state.last_error.clone().unwrap_or_default();
    let list_label = if state.list_visible { "Hide Saved Quotes" } else { "View Saved Quotes" };

    let refresh = {
        let app_state = app_state.clone();
        move |_: MouseEvent| app_state.dispatch(Action::Refresh)
    };
    let save = {
        let app_state = app_state.clone();
        move |_: MouseEvent| app_state.dispatch(Action::Save)
    };
    let share = {
        let app_state = app_state.clone();
        move |_: MouseEvent| app_state.dispatch(Action::Share)
    };
    let toggle = {
        let app_state = app_state.clone();
        move |_: MouseEvent| app_state.dispatch(Action::ToggleList)
    };

    rsx! {
        div {
            class: "flex flex-col gap-3",

            p { class: "text-center text-base leading-relaxed px-8", "{text}" }
            p { class: "text-right italic font-light", "{byline}" }

            button {
                class: "rounded-full p-5 my-5 text-lg",
                disabled: is_busy,
                onclick: refresh,
                "Get Another Quote"
            }

            div {
                class: "flex flex-row justify-around gap-2",
                button { class: "flex-1 rounded-full p-4", disabled: is_busy, onclick: save, "Save Quote" }
                button { class: "flex-1 rounded-full p-4", onclick: share, "Share Quote" }
                button { class: "flex-1 rounded-full p-4", onclick: toggle, "{list_label}" }
            }

            if !tweet_url.is_empty() {
                a { class: "text-xs text-center opacity-60", href: "{tweet_url}", "Tweet this quote" }
            }

            if !error.is_empty() {
                div { class: "text-sm text-red-700", "{error}" }
            }
        }
    }
}
