use hive_core::backend::{AuthBackend, NotesBackend};
use hive_core::draft::MemoryDraftStore;
use hive_core::screen::NotesScreen;
use hive_core::{Category, NoteId};

use crate::commands::common::{
    capture_editor_input_with_initial, normalize_note_identifier, require_signed_in,
    resolve_note_for_edit,
};
use crate::error::CliError;

pub async fn run_edit<B: AuthBackend + NotesBackend>(
    backend: &B,
    id: &str,
    category: Option<Category>,
) -> Result<(), CliError> {
    let id = edit_note(backend, id, category, capture_editor_input_with_initial).await?;
    println!("{id}");
    Ok(())
}

/// Load the note into an edit session, let `edit_content` rewrite it and
/// save the result. Unchanged notes are not sent.
pub async fn edit_note<B, F>(
    backend: &B,
    id: &str,
    category: Option<Category>,
    edit_content: F,
) -> Result<NoteId, CliError>
where
    B: AuthBackend + NotesBackend,
    F: FnOnce(&str) -> Result<Option<String>, CliError>,
{
    let normalized_id = normalize_note_identifier(id)?;
    require_signed_in(backend).await?;

    // Edits never touch the saved draft.
    let mut screen = NotesScreen::new(MemoryDraftStore::new());
    screen.refresh(backend).await?;
    let note_id = resolve_note_for_edit(&normalized_id, screen.notes())?;
    screen.begin_edit(&note_id)?;

    let original = screen.composer().clone();
    let Some(edited_content) = edit_content(&original.text)? else {
        return Err(CliError::EmptyEditedContent);
    };
    let category = category.unwrap_or(original.category);

    if edited_content == original.text && category == original.category {
        return Ok(note_id);
    }

    screen.set_draft_text(edited_content);
    screen.set_category(category);
    screen.submit(backend).await?;
    Ok(note_id)
}
