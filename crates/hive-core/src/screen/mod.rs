//! Notes screen state.
//!
//! [`NotesScreen`] holds everything the notes view shows and every rule about
//! how it changes. Front-ends render from it and forward user input to it.
//!
//! Network-bound operations come in two shapes. The `async` methods
//! (`submit`, `attach_file`, `confirm_dialog`, ...) run start to finish on a
//! `&mut` screen. The `begin_*` / `finish_*` pairs split the same work around
//! the network call so a UI can keep the screen in a reactive cell without
//! borrowing it across an `.await`.

use crate::backend::{AuthBackend, NotesBackend};
use crate::dialog::{ConfirmDialog, NotesAction};
use crate::draft::{DraftAutosave, DraftStore};
use crate::editor::{self, FormatAction, Selection};
use crate::error::{Error, Result};
use crate::models::{Category, NewNote, Note, NoteChanges, NoteId};
use crate::search::{filter_notes, ExpansionState};
use crate::storage::attachment_file_name;

pub const EDITING_LABEL: &str = "Editing Hive";
pub const DRAFT_SAVED_LABEL: &str = "Draft Saved 🍯";
pub const EMPTY_NOTE_MESSAGE: &str = "Write something first! 🐝";
pub const EXPAND_LABEL: &str = "See Full Note 🍯";
pub const COLLAPSE_LABEL: &str = "Show Less";

/// The note being composed or edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    pub text: String,
    /// Last known selection in `text`; `None` until the input reports one.
    pub selection: Option<Selection>,
    pub category: Category,
    pub file_url: Option<String>,
    /// Set while an existing note is being edited
    pub editing_id: Option<NoteId>,
}

impl Composer {
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

/// Submission captured by [`NotesScreen::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create {
        content: String,
        category: Category,
        file_url: Option<String>,
    },
    Update {
        id: NoteId,
        changes: NoteChanges,
    },
}

/// Result of a submission that reached the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Inserted; carries the re-fetched list unless the refresh failed
    Created(Option<Vec<Note>>),
    Updated {
        id: NoteId,
        changes: NoteChanges,
    },
}

impl SubmitRequest {
    /// Perform the network side of a submission.
    pub async fn send<B: AuthBackend + NotesBackend>(self, backend: &B) -> Result<SubmitOutcome> {
        match self {
            Self::Create {
                content,
                category,
                file_url,
            } => {
                let user = backend.current_user().await?.ok_or(Error::NotSignedIn)?;
                let note = NewNote::new(content, category, file_url, user.id);
                backend.insert_note(&note).await?;
                tracing::info!("Created note in category {}", category);

                let notes = match backend.fetch_notes().await {
                    Ok(notes) => Some(notes),
                    Err(error) => {
                        tracing::warn!("Failed to refresh notes after create: {}", error);
                        None
                    }
                };
                Ok(SubmitOutcome::Created(notes))
            }
            Self::Update { id, changes } => {
                backend.update_note(&id, &changes).await?;
                tracing::info!("Updated note {}", id);
                Ok(SubmitOutcome::Updated { id, changes })
            }
        }
    }
}

/// Upload a picked file under a random name, returning its public URL.
///
/// Failures are logged and read as "no attachment".
pub async fn upload_attachment<B: NotesBackend>(
    backend: &B,
    original_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Option<String> {
    let file_name = attachment_file_name(original_name);
    match backend
        .upload_attachment(&file_name, content_type, bytes)
        .await
    {
        Ok(url) => Some(url),
        Err(error) => {
            tracing::warn!("Attachment upload failed for {}: {}", original_name, error);
            None
        }
    }
}

/// State of the notes screen for one session
#[derive(Debug, Clone)]
pub struct NotesScreen<D: DraftStore> {
    notes: Vec<Note>,
    search_query: String,
    composer: Composer,
    expanded: ExpansionState,
    dialog: ConfirmDialog<NotesAction>,
    is_processing: bool,
    is_uploading: bool,
    autosave: DraftAutosave<D>,
}

impl<D: DraftStore> NotesScreen<D> {
    pub fn new(drafts: D) -> Self {
        Self {
            notes: Vec::new(),
            search_query: String::new(),
            composer: Composer::default(),
            expanded: ExpansionState::new(),
            dialog: ConfirmDialog::new(),
            is_processing: false,
            is_uploading: false,
            autosave: DraftAutosave::new(drafts),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub const fn dialog(&self) -> &ConfirmDialog<NotesAction> {
        &self.dialog
    }

    pub const fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub const fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub const fn drafts(&self) -> &D {
        self.autosave.store()
    }

    /// Label shown next to the toolbar, if any.
    pub fn status_label(&self) -> Option<&'static str> {
        if self.composer.is_editing() {
            Some(EDITING_LABEL)
        } else if self.composer.text.is_empty() {
            None
        } else {
            Some(DRAFT_SAVED_LABEL)
        }
    }

    /// Whether the discard control is offered.
    pub fn can_discard(&self) -> bool {
        self.status_label().is_some()
    }

    pub fn can_submit(&self) -> bool {
        !(self.is_processing || self.is_uploading)
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.is_processing {
            "..."
        } else if self.composer.is_editing() {
            "Update"
        } else {
            "Save Note"
        }
    }

    /// Preload the stored draft unless an edit is in progress.
    ///
    /// Returns whether a draft was restored.
    pub fn restore_draft(&mut self) -> bool {
        match self.autosave.restore(self.composer.is_editing()) {
            Some(text) => {
                self.composer.text = text;
                self.composer.selection = None;
                true
            }
            None => false,
        }
    }

    /// First load: restore the draft, then fetch the list.
    pub async fn mount<B: AuthBackend + NotesBackend>(&mut self, backend: &B) -> Result<()> {
        self.restore_draft();
        self.refresh(backend).await
    }

    /// Replace the list with the backend's when a user is signed in.
    ///
    /// On failure the current list is kept.
    pub async fn refresh<B: AuthBackend + NotesBackend>(&mut self, backend: &B) -> Result<()> {
        if backend.current_user().await?.is_none() {
            return Ok(());
        }
        let notes = backend.fetch_notes().await?;
        self.replace_notes(notes);
        Ok(())
    }

    pub fn replace_notes(&mut self, notes: Vec<Note>) {
        self.expanded.retain(&notes);
        self.notes = notes;
    }

    /// Text typed into the composer. The selection is clamped to it.
    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.composer.text = text.into();
        if let Some(selection) = self.composer.selection {
            self.composer.selection = Some(selection.clamp_to(&self.composer.text));
        }
        self.autosave_draft();
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.composer.selection = Some(selection.clamp_to(&self.composer.text));
    }

    /// Forget the selection, as when the input goes away.
    pub fn clear_selection(&mut self) {
        self.composer.selection = None;
    }

    pub fn set_category(&mut self, category: Category) {
        self.composer.category = category;
    }

    /// Newline keystroke at the current selection, continuing lists.
    ///
    /// Returns the new caret, or `None` when no selection is known and the
    /// keystroke is left to the input.
    pub fn press_enter(&mut self) -> Option<usize> {
        let selection = self.composer.selection?;
        let edit = editor::insert_newline(&self.composer.text, selection);
        Some(self.apply_edit(edit))
    }

    /// Toolbar formatting at the current selection.
    ///
    /// Skipped (returns `None`) when no selection is known.
    pub fn apply_format(&mut self, action: FormatAction) -> Option<usize> {
        let selection = self.composer.selection?;
        let edit = editor::apply_format(&self.composer.text, selection, action);
        Some(self.apply_edit(edit))
    }

    fn apply_edit(&mut self, edit: editor::Edit) -> usize {
        self.composer.text = edit.text;
        self.composer.selection = Some(Selection::caret(edit.cursor));
        self.autosave_draft();
        edit.cursor
    }

    fn autosave_draft(&self) {
        self.autosave
            .record(&self.composer.text, self.composer.is_editing());
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Notes matching the search query, newest first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.search_query)
    }

    pub fn is_expanded(&self, id: &NoteId) -> bool {
        self.expanded.is_expanded(id)
    }

    pub fn toggle_expand(&mut self, id: &NoteId) -> bool {
        self.expanded.toggle(id)
    }

    /// Validate the composer and mark the screen busy.
    ///
    /// `Ok(None)` means a submission or upload is already running and the
    /// request was skipped.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitRequest>> {
        if !self.can_submit() {
            return Ok(None);
        }
        if self.composer.text.trim().is_empty() {
            return Err(Error::Validation(EMPTY_NOTE_MESSAGE.to_string()));
        }

        self.is_processing = true;
        let request = match &self.composer.editing_id {
            Some(id) => SubmitRequest::Update {
                id: id.clone(),
                changes: NoteChanges {
                    content: self.composer.text.clone(),
                    category: self.composer.category,
                    file_url: self.composer.file_url.clone(),
                },
            },
            None => SubmitRequest::Create {
                content: self.composer.text.clone(),
                category: self.composer.category,
                file_url: self.composer.file_url.clone(),
            },
        };
        Ok(Some(request))
    }

    /// Apply the outcome of a submission and clear the busy flag.
    ///
    /// On error the composer is left untouched so the user can retry.
    pub fn finish_submit(&mut self, outcome: Result<SubmitOutcome>) -> Result<()> {
        self.is_processing = false;
        match outcome? {
            SubmitOutcome::Created(notes) => {
                self.reset_composer();
                self.autosave.clear();
                if let Some(notes) = notes {
                    self.replace_notes(notes);
                }
            }
            SubmitOutcome::Updated { id, changes } => {
                if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
                    note.apply_changes(&changes);
                }
                self.reset_composer();
                self.autosave_draft();
            }
        }
        Ok(())
    }

    /// Save the composer as a new note or as changes to the edited one.
    ///
    /// Returns `false` when skipped because the screen is busy.
    pub async fn submit<B: AuthBackend + NotesBackend>(&mut self, backend: &B) -> Result<bool> {
        let Some(request) = self.begin_submit()? else {
            return Ok(false);
        };
        let outcome = request.send(backend).await;
        self.finish_submit(outcome)?;
        Ok(true)
    }

    /// Keeps the category so consecutive notes share it.
    fn reset_composer(&mut self) {
        self.composer.text.clear();
        self.composer.file_url = None;
        self.composer.editing_id = None;
        self.composer.selection = self.composer.selection.map(|_| Selection::caret(0));
    }

    /// Load a listed note into the composer for editing.
    pub fn begin_edit(&mut self, id: &NoteId) -> Result<()> {
        let note = self
            .notes
            .iter()
            .find(|note| &note.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        self.composer = Composer {
            text: note.content.clone(),
            selection: Some(Selection::caret(note.content.len())),
            category: note.category,
            file_url: note.file_url.clone(),
            editing_id: Some(note.id.clone()),
        };
        Ok(())
    }

    pub fn request_discard(&mut self) {
        self.dialog.ask(NotesAction::DiscardDraft);
    }

    pub fn request_delete(&mut self, id: NoteId) {
        self.dialog.ask(NotesAction::DeleteNote(id));
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog.dismiss();
    }

    /// Close the dialog and run its action if it needs no network.
    ///
    /// Returns the note to delete when the confirmed action was a delete.
    pub fn begin_confirm(&mut self) -> Option<NoteId> {
        match self.dialog.confirm()? {
            NotesAction::DiscardDraft => {
                self.discard_draft();
                None
            }
            NotesAction::DeleteNote(id) => Some(id),
        }
    }

    /// Drop the deleted note locally once the backend agreed.
    pub fn finish_delete(&mut self, id: &NoteId, result: Result<()>) -> Result<()> {
        result?;
        self.notes.retain(|note| &note.id != id);
        self.expanded.retain(&self.notes);
        tracing::info!("Deleted note {}", id);
        Ok(())
    }

    /// Confirm the open dialog and carry out its action.
    pub async fn confirm_dialog<B: NotesBackend>(&mut self, backend: &B) -> Result<()> {
        let Some(id) = self.begin_confirm() else {
            return Ok(());
        };
        let result = backend.delete_note(&id).await;
        self.finish_delete(&id, result)
    }

    fn discard_draft(&mut self) {
        self.reset_composer();
        self.autosave.clear();
    }

    /// Mark an upload as running. Returns `false` if one already is.
    pub fn begin_upload(&mut self) -> bool {
        if self.is_uploading {
            return false;
        }
        self.is_uploading = true;
        true
    }

    pub fn finish_upload(&mut self, url: Option<String>) {
        self.is_uploading = false;
        if let Some(url) = url {
            self.composer.file_url = Some(url);
        }
    }

    /// Upload a file and attach it to the composer.
    ///
    /// Returns whether the composer now carries the new attachment.
    pub async fn attach_file<B: NotesBackend>(
        &mut self,
        backend: &B,
        original_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> bool {
        if !self.begin_upload() {
            return false;
        }
        let url = upload_attachment(backend, original_name, content_type, bytes).await;
        let attached = url.is_some();
        self.finish_upload(url);
        attached
    }

    pub fn remove_attachment(&mut self) {
        self.composer.file_url = None;
    }

    /// Sign out and forget the listed notes. The stored draft stays.
    pub async fn sign_out<B: AuthBackend>(&mut self, backend: &B) -> Result<()> {
        backend.sign_out().await?;
        self.forget_notes();
        Ok(())
    }

    /// Drop the listed notes and any open dialog of the old account.
    pub fn forget_notes(&mut self) {
        self.replace_notes(Vec::new());
        self.dialog.dismiss();
    }
}
