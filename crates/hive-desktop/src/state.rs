//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use hive_core::auth_screen::AuthForm;
use hive_core::draft::FileDraftStore;
use hive_core::screen::NotesScreen;

use crate::services::DesktopBackend;

pub type DesktopScreen = NotesScreen<FileDraftStore>;

/// Shown when the backend could not be built from the configuration.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "The hive is unreachable. Check HIVE_SUPABASE_URL and HIVE_SUPABASE_ANON_KEY.";

/// Which screen the window shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Checking for a stored session
    Loading,
    Login,
    Notes,
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// `None` when the Supabase configuration is unusable
    pub backend: Signal<Option<DesktopBackend>>,
    pub route: Signal<Route>,
    /// Notes list, composer, search and dialog state
    pub screen: Signal<DesktopScreen>,
    pub auth_form: Signal<AuthForm>,
    /// Message for the notice banner
    pub notice: Signal<Option<String>>,
}

impl AppState {
    /// Clone of the backend handle, for moving into a task.
    #[must_use]
    pub fn backend(&self) -> Option<DesktopBackend> {
        self.backend.read().clone()
    }

    /// Like [`Self::backend`], but shows the configuration notice when there
    /// is none.
    pub fn require_backend(&mut self) -> Option<DesktopBackend> {
        let backend = self.backend();
        if backend.is_none() {
            self.show_notice(NOT_CONFIGURED_MESSAGE);
        }
        backend
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice.set(Some(message.into()));
    }

    pub fn go_to(&mut self, route: Route) {
        tracing::debug!("Showing {:?}", route);
        self.route.set(route);
    }
}
