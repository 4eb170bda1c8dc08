//! Search bar component

use dioxus::prelude::*;

use crate::state::AppState;
use crate::theme::palette;

/// Case-insensitive content filter for the note cards
#[component]
pub fn SearchBar() -> Element {
    let mut state = use_context::<AppState>();
    let colors = palette();
    let query = state.screen.read().search_query().to_string();

    rsx! {
        div {
            class: "search-bar",
            style: "position: relative; width: 288px;",

            span {
                style: "position: absolute; left: 16px; top: 12px; font-size: 16px;",
                "🔍"
            }
            input {
                r#type: "text",
                placeholder: "Search notes...",
                value: "{query}",
                oninput: move |evt: FormEvent| {
                    state.screen.write().set_search_query(evt.value());
                },
                style: "
                    width: 100%;
                    box-sizing: border-box;
                    padding: 12px 16px 12px 44px;
                    border: 4px solid {colors.ink};
                    border-radius: 9999px;
                    box-shadow: 4px 4px 0 0 {colors.ink};
                    background: {colors.panel};
                    font-size: 14px;
                    font-weight: 700;
                    outline: none;
                ",
            }
        }
    }
}
