use dioxus::prelude::*;

use crate::theme::palette;

/// Banner for validation and backend messages
#[component]
pub fn NoticeBanner(message: String, on_dismiss: EventHandler<MouseEvent>) -> Element {
    let colors = palette();

    rsx! {
        div {
            class: "notice-banner",
            role: "alert",
            style: "
                position: fixed;
                top: 16px;
                left: 50%;
                transform: translateX(-50%);
                z-index: 200;
                display: flex;
                align-items: center;
                gap: 12px;
                max-width: 480px;
                padding: 12px 16px;
                background: {colors.panel};
                border: 4px solid {colors.ink};
                border-radius: 16px;
                box-shadow: 6px 6px 0 0 {colors.ink};
                font-weight: 700;
            ",
            span { style: "flex: 1;", "{message}" }
            button {
                onclick: move |evt| on_dismiss.call(evt),
                style: "
                    border: 2px solid {colors.ink};
                    border-radius: 8px;
                    background: {colors.highlight};
                    font-weight: 900;
                ",
                "OK"
            }
        }
    }
}
