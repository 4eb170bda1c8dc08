use std::path::Path;

use hive_core::backend::{AuthBackend, NotesBackend};
use hive_core::draft::{DraftStore, MemoryDraftStore};
use hive_core::screen::NotesScreen;
use hive_core::Category;

use crate::commands::common::{resolve_note_content, ContentSource};
use crate::error::CliError;

pub async fn run_add<B, D>(
    backend: &B,
    drafts: D,
    content_parts: &[String],
    category: Category,
    attach: Option<&Path>,
) -> Result<(), CliError>
where
    B: AuthBackend + NotesBackend,
    D: DraftStore,
{
    let mut screen = NotesScreen::new(drafts);
    screen.restore_draft();
    let (content, source) = resolve_note_content(content_parts, &screen.composer().text)?;

    // Only a note written from the saved draft may consume it.
    if source == ContentSource::Editor {
        add_note(screen, backend, content, category, attach).await
    } else {
        let scratch = NotesScreen::new(MemoryDraftStore::new());
        add_note(scratch, backend, content, category, attach).await
    }
}

pub async fn add_note<B, D>(
    mut screen: NotesScreen<D>,
    backend: &B,
    content: String,
    category: Category,
    attach: Option<&Path>,
) -> Result<(), CliError>
where
    B: AuthBackend + NotesBackend,
    D: DraftStore,
{
    screen.set_draft_text(content);
    screen.set_category(category);

    if let Some(path) = attach {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        if !screen
            .attach_file(backend, &file_name, content_type.essence_str(), bytes)
            .await
        {
            eprintln!("Upload failed; saving the note without an attachment");
        }
    }

    screen.submit(backend).await?;
    match screen.notes().first() {
        Some(note) => println!("{}", note.id),
        None => println!("Saved"),
    }
    Ok(())
}
