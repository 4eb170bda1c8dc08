//! Confirmation modal for discarding the draft and deleting notes

use dioxus::prelude::*;

use hive_core::backend::NotesBackend;
use hive_core::dialog::{CANCEL_LABEL, CONFIRM_LABEL};

use crate::state::AppState;
use crate::theme::palette;

#[component]
pub fn ConfirmDialog() -> Element {
    let mut state = use_context::<AppState>();
    let colors = palette();
    let Some(pending) = state.screen.read().dialog().pending().cloned() else {
        return rsx! {};
    };

    let confirm = move |_: MouseEvent| {
        let target = state.screen.write().begin_confirm();
        // A discard has already happened; only deletes go to the backend.
        let Some(id) = target else {
            return;
        };
        let Some(backend) = state.require_backend() else {
            return;
        };
        spawn(async move {
            let result = backend.delete_note(&id).await;
            let finished = state.screen.write().finish_delete(&id, result);
            if let Err(error) = finished {
                tracing::error!("Failed to delete note {}: {}", id, error);
                state.show_notice(error.to_string());
            }
        });
    };

    rsx! {
        div {
            class: "dialog-backdrop",
            style: "
                position: fixed;
                inset: 0;
                z-index: 100;
                display: flex;
                align-items: center;
                justify-content: center;
                padding: 16px;
                background: rgba(69, 26, 3, 0.6);
            ",

            div {
                class: "dialog",
                role: "alertdialog",
                style: "
                    width: 100%;
                    max-width: 384px;
                    overflow: hidden;
                    background: {colors.panel};
                    border: 4px solid {colors.ink};
                    border-radius: 32px;
                    box-shadow: 12px 12px 0 0 rgba(69, 26, 3, 0.3);
                ",

                div {
                    style: "
                        display: flex;
                        align-items: center;
                        gap: 12px;
                        padding: 16px;
                        background: {colors.highlight};
                        border-bottom: 4px solid {colors.ink};
                    ",
                    span {
                        style: "
                            padding: 4px 8px;
                            background: {colors.panel};
                            border: 2px solid {colors.ink};
                            border-radius: 12px;
                        ",
                        "⚠"
                    }
                    h3 {
                        style: "margin: 0; font-size: 18px; font-weight: 900; text-transform: uppercase;",
                        "{pending.title}"
                    }
                }

                div {
                    style: "padding: 24px;",
                    p {
                        style: "margin: 0 0 24px; font-size: 14px; font-weight: 700; line-height: 1.6;",
                        "{pending.message}"
                    }
                    div {
                        style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                        button {
                            onclick: move |_| state.screen.write().dismiss_dialog(),
                            style: "
                                padding: 12px 16px;
                                background: {colors.panel};
                                border: 2px solid {colors.ink};
                                border-radius: 12px;
                                font-size: 12px;
                                font-weight: 900;
                                text-transform: uppercase;
                            ",
                            "{CANCEL_LABEL}"
                        }
                        button {
                            onclick: confirm,
                            style: "
                                padding: 12px 16px;
                                background: {colors.danger};
                                color: {colors.panel};
                                border: 2px solid {colors.ink};
                                border-radius: 12px;
                                box-shadow: 4px 4px 0 0 {colors.ink};
                                font-size: 12px;
                                font-weight: 900;
                                text-transform: uppercase;
                            ",
                            "{CONFIRM_LABEL}"
                        }
                    }
                }
            }
        }
    }
}
