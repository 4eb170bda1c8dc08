use std::io::{BufRead, Write};

use hive_core::draft::DraftStore;
use hive_core::editor::Selection;
use hive_core::screen::NotesScreen;

use crate::cli::DraftCommands;
use crate::commands::common::{char_to_byte, prompt_confirmation};
use crate::error::CliError;

pub fn run_draft<D: DraftStore>(
    command: DraftCommands,
    drafts: D,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let mut screen = NotesScreen::new(drafts);
    screen.restore_draft();

    match command {
        DraftCommands::Show => {
            if screen.composer().text.is_empty() {
                writeln!(output, "No draft saved")?;
            } else {
                writeln!(output, "{}", screen.composer().text)?;
            }
        }
        DraftCommands::Set { text } => {
            screen.set_draft_text(text.join(" "));
            if let Some(label) = screen.status_label() {
                writeln!(output, "{label}")?;
            }
        }
        DraftCommands::Discard { yes } => {
            if !screen.can_discard() {
                writeln!(output, "No draft to discard")?;
                return Ok(());
            }
            screen.request_discard();
            let confirmed = match screen.dialog().pending() {
                Some(_) if yes => true,
                Some(pending) => prompt_confirmation(pending, input, output)?,
                None => false,
            };
            if confirmed {
                screen.begin_confirm();
                writeln!(output, "Draft discarded")?;
            } else {
                screen.dismiss_dialog();
                writeln!(output, "Kept it")?;
            }
        }
        DraftCommands::Format { action, start, end } => {
            let selection = selection_in(&screen.composer().text, start, end)?;
            screen.set_selection(selection);
            screen.apply_format(action);
            writeln!(output, "{}", screen.composer().text)?;
        }
        DraftCommands::Newline { at } => {
            let selection = selection_in(&screen.composer().text, at, None)?;
            screen.set_selection(selection);
            screen.press_enter();
            writeln!(output, "{}", screen.composer().text)?;
        }
    }

    Ok(())
}

/// Character positions to a byte selection. Missing positions mean the end
/// of the text, and a missing end collapses onto the start.
fn selection_in(
    text: &str,
    start: Option<usize>,
    end: Option<usize>,
) -> Result<Selection, CliError> {
    let length = text.chars().count();
    let start = start.unwrap_or(length);
    let end = end.unwrap_or(start);
    Ok(Selection::new(
        char_to_byte(text, start)?,
        char_to_byte(text, end)?,
    ))
}
