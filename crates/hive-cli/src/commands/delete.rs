use std::io::{BufRead, Write};

use hive_core::backend::{AuthBackend, NotesBackend};
use hive_core::draft::MemoryDraftStore;
use hive_core::screen::NotesScreen;

use crate::commands::common::{
    normalize_note_identifier, prompt_confirmation, require_signed_in, resolve_note_for_edit,
};
use crate::error::CliError;

pub async fn run_delete<B: AuthBackend + NotesBackend>(
    backend: &B,
    id: &str,
    skip_confirmation: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    require_signed_in(backend).await?;

    let mut screen = NotesScreen::new(MemoryDraftStore::new());
    screen.refresh(backend).await?;
    let note_id = resolve_note_for_edit(&normalized_id, screen.notes())?;

    screen.request_delete(note_id.clone());
    let confirmed = match screen.dialog().pending() {
        Some(_) if skip_confirmation => true,
        Some(pending) => prompt_confirmation(pending, input, output)?,
        None => false,
    };
    if !confirmed {
        screen.dismiss_dialog();
        writeln!(output, "Kept it")?;
        return Ok(());
    }

    screen.confirm_dialog(backend).await?;
    writeln!(output, "{note_id}")?;
    Ok(())
}
