//! Two-button confirmation dialog state.

use crate::models::NoteId;

pub const CANCEL_LABEL: &str = "Keep it";
pub const CONFIRM_LABEL: &str = "Confirm";

/// An open confirmation prompt carrying the action to run on confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation<A> {
    pub title: String,
    pub message: String,
    pub action: A,
}

/// At most one pending confirmation. Dismissing drops it; confirming hands
/// the action back to the caller and closes the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<A> {
    pending: Option<Confirmation<A>>,
}

impl<A> Default for ConfirmDialog<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmDialog<A> {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Open the dialog, replacing any prompt already showing.
    pub fn request(&mut self, title: impl Into<String>, message: impl Into<String>, action: A) {
        self.pending = Some(Confirmation {
            title: title.into(),
            message: message.into(),
            action,
        });
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Close the dialog and return the action to run.
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|confirmation| confirmation.action)
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&Confirmation<A>> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

/// Destructive actions on the notes screen that need confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    DiscardDraft,
    DeleteNote(NoteId),
}

impl NotesAction {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::DiscardDraft => "Discard Draft?",
            Self::DeleteNote(_) => "Delete Note?",
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::DiscardDraft => {
                "The bees worked hard on this! Are you sure you want to clear your current note?"
            }
            Self::DeleteNote(_) => {
                "This note will be gone forever! Are you sure you want to remove it from the hive?"
            }
        }
    }
}

impl ConfirmDialog<NotesAction> {
    /// Open the dialog with the action's own title and message.
    pub fn ask(&mut self, action: NotesAction) {
        self.request(action.title(), action.message(), action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_returns_action_and_closes() {
        let mut dialog = ConfirmDialog::new();
        dialog.ask(NotesAction::DeleteNote(NoteId::new("7")));

        let pending = dialog.pending().unwrap();
        assert_eq!(pending.title, "Delete Note?");
        assert!(pending.message.contains("gone forever"));

        assert_eq!(dialog.confirm(), Some(NotesAction::DeleteNote(NoteId::new("7"))));
        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn dismiss_drops_pending_action() {
        let mut dialog = ConfirmDialog::new();
        dialog.ask(NotesAction::DiscardDraft);
        dialog.dismiss();
        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn new_request_replaces_previous() {
        let mut dialog = ConfirmDialog::new();
        dialog.request("A", "first", 1);
        dialog.request("B", "second", 2);
        assert_eq!(dialog.pending().map(|c| c.title.as_str()), Some("B"));
        assert_eq!(dialog.confirm(), Some(2));
    }
}
