use hive_core::backend::{AuthBackend, NotesBackend};
use hive_core::draft::MemoryDraftStore;
use hive_core::screen::NotesScreen;

use crate::commands::common::{
    format_note_lines, note_to_list_item, require_signed_in, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list<B: AuthBackend + NotesBackend>(
    backend: &B,
    search: Option<&str>,
    full: bool,
    as_json: bool,
) -> Result<(), CliError> {
    require_signed_in(backend).await?;
    let mut screen = NotesScreen::new(MemoryDraftStore::new());
    screen.refresh(backend).await?;
    if let Some(query) = search {
        screen.set_search_query(query);
    }
    let notes = screen.visible_notes();

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        match search {
            Some(query) => println!("No notes match '{query}'."),
            None => println!("The hive is empty. Add one with `hive add`."),
        }
    } else {
        for line in format_note_lines(&notes, full) {
            println!("{line}");
        }
    }

    Ok(())
}
