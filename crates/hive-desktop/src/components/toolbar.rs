//! Formatting toolbar above the composer

use dioxus::prelude::*;

use hive_core::editor::FormatAction;

use crate::theme::palette;

/// Button order, glyph and tooltip
const FORMAT_BUTTONS: [(FormatAction, &str, &str); 5] = [
    (FormatAction::Bold, "B", "Bold"),
    (FormatAction::Italic, "I", "Italic"),
    (FormatAction::Bullet, "•", "Bullet list"),
    (FormatAction::Numbered, "1.", "Numbered list"),
    (FormatAction::Strikethrough, "S", "Strike / mark done"),
];

/// Format buttons and the attach button, with the composer status (empty for
/// none) on the right.
#[component]
pub fn Toolbar(
    status: String,
    on_format: EventHandler<FormatAction>,
    on_attach: EventHandler<MouseEvent>,
) -> Element {
    let colors = palette();
    let button_style = format!(
        "
        min-width: 34px;
        height: 34px;
        padding: 0 8px;
        background: {};
        border: 2px solid {};
        border-radius: 12px;
        color: {};
        font-weight: 900;
        ",
        colors.panel, colors.ink, colors.ink
    );

    rsx! {
        div {
            class: "toolbar",
            style: "
                display: flex;
                justify-content: space-between;
                align-items: center;
                padding: 8px 20px;
                background: {colors.highlight};
                border-bottom: 4px solid {colors.ink};
            ",

            div {
                style: "display: flex; gap: 8px;",
                for (action, glyph, label) in FORMAT_BUTTONS {
                    button {
                        key: "{label}",
                        title: label,
                        style: "{button_style}",
                        // Keep the text area's selection while clicking
                        onmousedown: move |evt: MouseEvent| evt.prevent_default(),
                        onclick: move |_| on_format.call(action),
                        if action == FormatAction::Strikethrough {
                            s { "{glyph}" }
                        } else if action == FormatAction::Italic {
                            em { "{glyph}" }
                        } else {
                            "{glyph}"
                        }
                    }
                }
                button {
                    title: "Attach a file",
                    style: "{button_style}",
                    onclick: move |evt| on_attach.call(evt),
                    "📎"
                }
            }

            if !status.is_empty() {
                span {
                    style: "
                        font-size: 10px;
                        font-weight: 900;
                        text-transform: uppercase;
                        opacity: 0.4;
                    ",
                    "{status}"
                }
            }
        }
    }
}
