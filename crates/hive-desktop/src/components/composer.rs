//! Composer: toolbar, text area, attachment preview and save controls.
//!
//! The text area stays a plain controlled input. Enter and the toolbar read
//! the selection from the page, run the list-aware edit in `hive-core`, and
//! put the caret back where the edit says.

use dioxus::prelude::*;
use rfd::AsyncFileDialog;

use hive_core::backend::NotesBackend;
use hive_core::editor::offsets::{byte_to_utf16, selection_from_utf16};
use hive_core::draft::DraftStore;
use hive_core::editor::{FormatAction, Selection};
use hive_core::models::Attachment;
use hive_core::screen::{upload_attachment, NotesScreen};
use hive_core::Category;

use super::{CategoryPicker, Toolbar};
use crate::state::{AppState, DesktopScreen};
use crate::theme::palette;

const COMPOSER_ID: &str = "hive-composer";

/// Selection of the text area in UTF-16 units, as the page reports it.
async fn read_selection() -> Option<(usize, usize)> {
    let script = format!(
        r#"const input = document.getElementById("{COMPOSER_ID}");
        return input ? [input.selectionStart, input.selectionEnd] : null;"#
    );
    match document::eval(&script)
        .join::<Option<(usize, usize)>>()
        .await
    {
        Ok(selection) => selection,
        Err(error) => {
            tracing::warn!("Failed to read the composer selection: {:?}", error);
            None
        }
    }
}

/// Focus the text area with the caret at a UTF-16 offset, after the next
/// render has applied the new value.
fn place_caret(utf16_offset: usize) {
    let script = format!(
        r#"requestAnimationFrame(() => {{
            const input = document.getElementById("{COMPOSER_ID}");
            if (input) {{
                input.focus();
                input.setSelectionRange({utf16_offset}, {utf16_offset});
            }}
        }});"#
    );
    let _ = document::eval(&script);
}

/// Sync the page selection into the screen, then run `edit` on it.
async fn edit_at_selection(
    mut state: AppState,
    edit: impl FnOnce(&mut DesktopScreen) -> Option<usize>,
) {
    let page_selection = read_selection().await;

    let caret = {
        let mut screen = state.screen.write();
        adopt_selection(&mut screen, page_selection);
        edit(&mut *screen).map(|caret| byte_to_utf16(&screen.composer().text, caret))
    };
    if let Some(caret) = caret {
        place_caret(caret);
    }
}

/// Move the page selection into the screen.
///
/// The keystroke has already been taken from the page, so when the page
/// cannot report a selection the last known one is kept, or the caret goes
/// to the end of the text.
fn adopt_selection<D: DraftStore>(
    screen: &mut NotesScreen<D>,
    page_selection: Option<(usize, usize)>,
) {
    let composer = screen.composer();
    let selection = match page_selection {
        Some((start, end)) => selection_from_utf16(&composer.text, start, end),
        None => composer
            .selection
            .unwrap_or_else(|| Selection::caret(composer.text.len())),
    };
    screen.set_selection(selection);
}

#[component]
pub fn Composer() -> Element {
    let mut state = use_context::<AppState>();
    let colors = palette();

    let (composer, status, can_discard, can_submit, submit_label, uploading) = {
        let screen = state.screen.read();
        (
            screen.composer().clone(),
            screen.status_label().unwrap_or_default(),
            screen.can_discard(),
            screen.can_submit(),
            screen.submit_label(),
            screen.is_uploading(),
        )
    };

    let on_keydown = move |evt: KeyboardEvent| {
        let modifiers = evt.modifiers();
        if evt.key() != Key::Enter || modifiers.shift() || modifiers.ctrl() || modifiers.alt() {
            return;
        }
        evt.prevent_default();
        spawn(edit_at_selection(state, |screen| screen.press_enter()));
    };

    let on_format = move |action: FormatAction| {
        spawn(edit_at_selection(state, move |screen| {
            screen.apply_format(action)
        }));
    };

    let on_attach = move |_: MouseEvent| {
        let Some(backend) = state.require_backend() else {
            return;
        };
        spawn(async move {
            let Some(file) = AsyncFileDialog::new().pick_file().await else {
                return;
            };
            if !state.screen.write().begin_upload() {
                return;
            }

            let file_name = file.file_name();
            let bytes = file.read().await;
            let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
            tracing::info!("Uploading attachment {} ({} bytes)", file_name, bytes.len());
            let url =
                upload_attachment(&backend, &file_name, content_type.essence_str(), bytes).await;
            state.screen.write().finish_upload(url);
        });
    };

    let on_submit = move |_: MouseEvent| {
        let Some(backend) = state.require_backend() else {
            return;
        };
        let begun = state.screen.write().begin_submit();
        let request = match begun {
            Ok(Some(request)) => request,
            Ok(None) => return,
            Err(error) => {
                state.show_notice(error.to_string());
                return;
            }
        };

        spawn(async move {
            let outcome = request.send(&backend).await;
            let finished = state.screen.write().finish_submit(outcome);
            if let Err(error) = finished {
                tracing::error!("Failed to save note: {}", error);
                state.show_notice(error.to_string());
            }
        });
    };

    rsx! {
        div {
            class: "composer",
            style: "
                max-width: 576px;
                margin: 0 auto 48px;
                overflow: hidden;
                background: {colors.panel};
                border: 4px solid {colors.ink};
                border-radius: 32px;
                box-shadow: 10px 10px 0 0 rgba(120, 53, 15, 0.15);
            ",

            Toolbar {
                status: status.to_string(),
                on_format,
                on_attach,
            }

            textarea {
                id: COMPOSER_ID,
                placeholder: "Write a note...",
                value: "{composer.text}",
                oninput: move |evt: FormEvent| state.screen.write().set_draft_text(evt.value()),
                onkeydown: on_keydown,
                style: "
                    display: block;
                    width: 100%;
                    min-height: 140px;
                    box-sizing: border-box;
                    padding: 16px 20px;
                    border: none;
                    outline: none;
                    resize: none;
                    font-family: inherit;
                    font-size: 18px;
                    font-weight: 500;
                    color: {colors.ink};
                    background: {colors.panel};
                ",
            }

            if uploading || composer.file_url.is_some() {
                div {
                    style: "padding: 0 20px 16px;",
                    div {
                        style: "
                            position: relative;
                            display: inline-block;
                            max-width: 200px;
                            overflow: hidden;
                            background: #f5f5f4;
                            border: 2px solid {colors.ink};
                            border-radius: 12px;
                        ",
                        if uploading {
                            div {
                                style: "
                                    display: flex;
                                    align-items: center;
                                    justify-content: center;
                                    width: 160px;
                                    height: 96px;
                                    font-weight: 900;
                                ",
                                "Uploading... 🐝"
                            }
                        } else if let Some(url) = composer.file_url.clone() {
                            {match Attachment::from_url(&url) {
                                Attachment::Image(url) => rsx! {
                                    img {
                                        src: "{url}",
                                        alt: "Preview",
                                        style: "
                                            display: block;
                                            width: 100%;
                                            max-height: 128px;
                                            object-fit: cover;
                                            opacity: 0.8;
                                        ",
                                    }
                                },
                                Attachment::Document(_) => rsx! {
                                    div {
                                        style: "padding: 24px 32px 16px; font-size: 10px; font-weight: 900;",
                                        "📎 Attached"
                                    }
                                },
                            }}
                            button {
                                title: "Remove attachment",
                                onclick: move |_| state.screen.write().remove_attachment(),
                                style: "
                                    position: absolute;
                                    top: 4px;
                                    right: 4px;
                                    background: {colors.panel};
                                    border: 2px solid {colors.ink};
                                    border-radius: 9999px;
                                    font-size: 10px;
                                ",
                                "✕"
                            }
                        }
                    }
                }
            }

            div {
                style: "
                    display: flex;
                    flex-wrap: wrap;
                    gap: 8px;
                    justify-content: space-between;
                    align-items: center;
                    padding: 12px 20px;
                    background: {colors.footer};
                    border-top: 4px solid {colors.ink};
                ",

                CategoryPicker {
                    selected: composer.category,
                    on_select: move |category: Category| state.screen.write().set_category(category),
                }

                div {
                    style: "display: flex; gap: 8px;",
                    if can_discard {
                        button {
                            title: "Discard",
                            onclick: move |_| state.screen.write().request_discard(),
                            style: "
                                padding: 8px;
                                background: {colors.panel};
                                color: {colors.ink};
                                border: 2px solid {colors.ink};
                                border-radius: 12px;
                            ",
                            "🗑"
                        }
                    }
                    button {
                        disabled: !can_submit,
                        onclick: on_submit,
                        style: "
                            padding: 8px 24px;
                            background: {colors.ink};
                            color: {colors.footer};
                            border: none;
                            border-radius: 12px;
                            font-size: 14px;
                            font-weight: 900;
                            letter-spacing: 0.05em;
                            text-transform: uppercase;
                        ",
                        "{submit_label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hive_core::draft::MemoryDraftStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn page_selection_is_converted_from_utf16() {
        let mut screen = NotesScreen::new(MemoryDraftStore::new());
        screen.set_draft_text("🍯 honey");

        adopt_selection(&mut screen, Some((3, 3)));
        assert_eq!(screen.composer().selection, Some(Selection::caret(5)));
    }

    #[test]
    fn enter_without_page_selection_still_inserts_a_newline() {
        let mut screen = NotesScreen::new(MemoryDraftStore::new());
        screen.set_draft_text("plain");

        adopt_selection(&mut screen, None);
        assert_eq!(screen.press_enter(), Some(6));
        assert_eq!(screen.composer().text, "plain\n");
    }

    #[test]
    fn missing_page_selection_keeps_the_last_known_one() {
        let mut screen = NotesScreen::new(MemoryDraftStore::new());
        screen.set_draft_text("ab");
        screen.set_selection(Selection::caret(1));

        adopt_selection(&mut screen, None);
        assert_eq!(screen.press_enter(), Some(2));
        assert_eq!(screen.composer().text, "a\nb");
    }
}
