//! Notes view - composer on top, note cards below

use dioxus::prelude::*;

use hive_core::backend::{AuthBackend, NotesBackend};
use hive_core::{Note, NoteId};

use crate::components::{Composer, ConfirmDialog, NoteCard, SearchBar};
use crate::state::{AppState, Route};
use crate::theme::palette;

/// Restore the draft, then load the signed-in user's notes.
async fn load_notes(mut state: AppState) {
    state.screen.write().restore_draft();
    let Some(backend) = state.backend() else {
        return;
    };

    match backend.current_user().await {
        Ok(Some(_)) => match backend.fetch_notes().await {
            Ok(notes) => {
                tracing::info!("Loaded {} notes", notes.len());
                state.screen.write().replace_notes(notes);
            }
            Err(error) => tracing::error!("Failed to load notes: {}", error),
        },
        Ok(None) => tracing::debug!("No session; skipping note load"),
        Err(error) => tracing::error!("Failed to resolve the current user: {}", error),
    }
}

#[component]
pub fn Notes() -> Element {
    let mut state = use_context::<AppState>();
    let colors = palette();

    use_future(move || load_notes(state));

    let cards: Vec<(Note, bool)> = {
        let screen = state.screen.read();
        screen
            .visible_notes()
            .into_iter()
            .map(|note| (note.clone(), screen.is_expanded(&note.id)))
            .collect()
    };
    let dialog_open = state.screen.read().dialog().is_open();

    let sign_out = move |_: MouseEvent| {
        let backend = state.backend();
        spawn(async move {
            if let Some(backend) = backend {
                if let Err(error) = backend.sign_out().await {
                    tracing::warn!("Sign out failed: {}", error);
                }
            }
            state.screen.write().forget_notes();
            state.go_to(Route::Login);
        });
    };

    let mut edit = move |id: NoteId| {
        let result = state.screen.write().begin_edit(&id);
        match result {
            Ok(()) => {
                let _ = document::eval("window.scrollTo({ top: 0, behavior: 'smooth' });");
            }
            Err(error) => state.show_notice(error.to_string()),
        }
    };

    rsx! {
        div {
            class: "notes-view",
            style: "
                min-height: 100vh;
                padding: 40px;
                box-sizing: border-box;
                background: {colors.page};
            ",

            if dialog_open {
                ConfirmDialog {}
            }

            div {
                style: "max-width: 1024px; margin: 0 auto;",

                header {
                    style: "
                        display: flex;
                        flex-wrap: wrap;
                        justify-content: space-between;
                        align-items: center;
                        gap: 24px;
                        margin-bottom: 32px;
                    ",

                    div {
                        style: "
                            display: flex;
                            align-items: center;
                            gap: 16px;
                            padding: 12px;
                            background: {colors.ink};
                            border: 4px solid {colors.ink_dark};
                            border-radius: 16px;
                        ",
                        span { style: "font-size: 30px;", "🐻" }
                        h1 {
                            style: "
                                margin: 0;
                                font-size: 24px;
                                font-weight: 900;
                                text-transform: uppercase;
                                color: {colors.footer};
                            ",
                            "Hive"
                        }
                    }

                    div {
                        style: "display: flex; align-items: center; gap: 12px;",
                        SearchBar {}
                        button {
                            title: "Sign out",
                            onclick: sign_out,
                            style: "
                                width: 48px;
                                height: 48px;
                                border: 4px solid {colors.ink};
                                border-radius: 50%;
                                background: {colors.danger};
                                color: {colors.panel};
                                font-weight: 900;
                            ",
                            "⏻"
                        }
                    }
                }

                Composer {}

                div {
                    class: "hive-notes",
                    for (note, expanded) in cards {
                        NoteCard {
                            key: "{note.id}",
                            note: note.clone(),
                            expanded,
                            on_edit: move |id: NoteId| edit(id),
                            on_delete: move |id: NoteId| state.screen.write().request_delete(id),
                            on_toggle: move |id: NoteId| {
                                state.screen.write().toggle_expand(&id);
                            },
                        }
                    }
                }
            }
        }
    }
}
