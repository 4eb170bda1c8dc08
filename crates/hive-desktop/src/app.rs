//! Main application component

use dioxus::prelude::*;

use hive_core::auth_screen::AuthForm;
use hive_core::backend::AuthBackend;
use hive_core::screen::NotesScreen;

use crate::components::NoticeBanner;
use crate::services::{connect_backend, open_draft_store};
use crate::state::{AppState, Route, NOT_CONFIGURED_MESSAGE};
use crate::theme::{palette, GLOBAL_CSS};
use crate::views::{Login, Notes};

/// Root application component
#[component]
pub fn App() -> Element {
    let backend = use_signal(|| match connect_backend() {
        Ok(backend) => Some(backend),
        Err(error) => {
            tracing::error!("Failed to configure the Supabase backend: {}", error);
            None
        }
    });
    let route = use_signal(|| Route::Loading);
    let screen = use_signal(|| NotesScreen::new(open_draft_store()));
    let auth_form = use_signal(AuthForm::new);
    let notice = use_signal(|| None::<String>);

    let mut state = use_context_provider(|| AppState {
        backend,
        route,
        screen,
        auth_form,
        notice,
    });

    // Pick the first screen from the stored session (only once)
    use_future(move || async move {
        let Some(backend) = state.backend() else {
            state.show_notice(NOT_CONFIGURED_MESSAGE);
            state.go_to(Route::Login);
            return;
        };

        match backend.current_user().await {
            Ok(Some(user)) => {
                tracing::info!("Restored session for user {}", user.id);
                state.go_to(Route::Notes);
            }
            Ok(None) => state.go_to(Route::Login),
            Err(error) => {
                tracing::warn!("Failed to restore session: {}", error);
                state.go_to(Route::Login);
            }
        }
    });

    let colors = palette();

    rsx! {
        style { "{GLOBAL_CSS}" }

        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                color: {colors.ink};
            ",

            if let Some(message) = (state.notice)() {
                NoticeBanner {
                    message,
                    on_dismiss: move |_| state.notice.set(None),
                }
            }

            {match (state.route)() {
                Route::Loading => rsx! {
                    div {
                        style: "
                            min-height: 100vh;
                            display: flex;
                            align-items: center;
                            justify-content: center;
                            font-size: 48px;
                            background: {colors.page};
                        ",
                        "🐝"
                    }
                },
                Route::Login => rsx! { Login {} },
                Route::Notes => rsx! { Notes {} },
            }}
        }
    }
}
