use std::io::Cursor;

use chrono::{TimeZone, Utc};
use clap::Parser;
use clap_complete::Shell;
use hive_core::backend::{AuthBackend, MemoryBackend, NotesBackend};
use hive_core::draft::{DraftStore, MemoryDraftStore};
use hive_core::editor::{FormatAction, DONE_HEADER};
use hive_core::models::NewNote;
use hive_core::screen::NotesScreen;
use hive_core::{Category, Note, NoteId};
use pretty_assertions::assert_eq;

use crate::cli::{AuthCommands, Cli, Commands, DraftCommands};
use crate::commands::add::add_note;
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::{
    char_to_byte, collapsed_content, default_editor, format_note_lines, format_relative_time,
    normalize_content, normalize_note_identifier, note_preview, prompt_confirmation,
    resolve_note_for_edit,
};
use crate::commands::completions::completion_script;
use crate::commands::delete::run_delete;
use crate::commands::draft::run_draft;
use crate::commands::edit::edit_note;
use crate::error::CliError;
fn note(id: &str, content: &str) -> Note {
    Note {
        id: NoteId::new(id),
        content: content.to_string(),
        user_id: "user-1".to_string(),
        category: Category::General,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        file_url: None,
    }
}

async fn backend_with_notes(contents: &[&str]) -> MemoryBackend {
    let backend = MemoryBackend::signed_in("bee@hive.test", "honey");
    let user = backend.current_user().await.unwrap().unwrap();
    for content in contents {
        backend
            .insert_note(&NewNote::new(*content, Category::General, None, &user.id))
            .await
            .unwrap();
    }
    backend
}

fn draft(command: DraftCommands, drafts: &MemoryDraftStore, answer: &str) -> String {
    let mut input = Cursor::new(answer.as_bytes().to_vec());
    let mut output = Vec::new();
    run_draft(command, drafts.clone(), &mut input, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn normalize_content_rejects_blank_text() {
    assert_eq!(normalize_content(" \n\t "), None);
    assert_eq!(normalize_content(""), None);
}

#[test]
fn normalize_content_keeps_text_as_typed() {
    assert_eq!(normalize_content("  * item"), Some("  * item".to_string()));
    assert_eq!(normalize_content("hello  "), Some("hello  ".to_string()));
    assert_eq!(normalize_content("  * item\r\n"), Some("  * item".to_string()));
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("* milk\n* honey\n"),
        Some("* milk\n* honey".to_string())
    );
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn normalize_note_identifier_rejects_blank() {
    assert!(matches!(
        normalize_note_identifier("   "),
        Err(CliError::EmptyNoteId)
    ));
    assert_eq!(normalize_note_identifier(" 42 ").unwrap(), "42");
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
}

#[test]
fn note_preview_collapses_whitespace_and_truncates() {
    let preview = note_preview(&note("1", "  Buy   honey  and\twax  \nsecond line"), 12);
    assert_eq!(preview, "Buy honey...");
}

#[test]
fn resolve_note_prefers_exact_then_unique_prefix() {
    let notes = vec![note("12", "a"), note("123", "b"), note("456", "c")];
    assert_eq!(resolve_note_for_edit("12", &notes).unwrap(), NoteId::new("12"));
    assert_eq!(resolve_note_for_edit("45", &notes).unwrap(), NoteId::new("456"));
    assert!(matches!(
        resolve_note_for_edit("1", &notes),
        Err(CliError::AmbiguousNoteId(_))
    ));
    assert!(matches!(
        resolve_note_for_edit("9", &notes),
        Err(CliError::NoteNotFound(_))
    ));
}

#[test]
fn long_notes_are_collapsed_unless_full() {
    let content = (1..=7).map(|n| format!("{n}. item")).collect::<Vec<_>>().join("\n");
    let long = note("1", &content);

    let collapsed = collapsed_content(&long.content);
    assert!(collapsed.starts_with("1. item\n2. item"));
    assert!(!collapsed.contains("6. item"));
    assert!(collapsed.ends_with("..."));

    let lines = format_note_lines(&[&long], false);
    assert!(lines.iter().any(|line| line.contains("See Full Note")));
    let lines = format_note_lines(&[&long], true);
    assert!(lines.iter().any(|line| line.contains("7. item")));
}

#[test]
fn note_lines_show_badge_and_attachment() {
    let mut with_file = note("1", "Hello **world**");
    with_file.category = Category::Idea;
    with_file.file_url = Some("https://x/report.pdf".to_string());

    let lines = format_note_lines(&[&with_file], false);
    assert!(lines[0].contains("💡 Idea"));
    assert!(lines[0].contains("2024-05-01"));
    assert_eq!(lines[1], "    Hello **world**");
    assert_eq!(lines[2], "    View Document 📎 https://x/report.pdf");
}

#[test]
fn char_positions_map_to_byte_offsets() {
    let text = "🍯 honey";
    assert_eq!(char_to_byte(text, 0).unwrap(), 0);
    assert_eq!(char_to_byte(text, 1).unwrap(), 4);
    assert_eq!(char_to_byte(text, 7).unwrap(), text.len());
    assert!(matches!(
        char_to_byte(text, 8),
        Err(CliError::InvalidPosition { position: 8, .. })
    ));
}

#[test]
fn confirmation_prompt_needs_explicit_confirm() {
    let mut dialog = hive_core::dialog::ConfirmDialog::new();
    dialog.ask(hive_core::dialog::NotesAction::DiscardDraft);
    let pending = dialog.pending().unwrap();

    let mut output = Vec::new();
    assert!(prompt_confirmation(pending, &mut Cursor::new("c\n"), &mut output).unwrap());
    let rendered = String::from_utf8(output).unwrap();
    assert!(rendered.contains("Discard Draft?"));
    assert!(rendered.contains("Keep it"));

    assert!(!prompt_confirmation(pending, &mut Cursor::new("\n"), &mut Vec::new()).unwrap());
    assert!(!prompt_confirmation(pending, &mut Cursor::new("k\n"), &mut Vec::new()).unwrap());
}

#[test]
fn completion_script_mentions_binary() {
    let script = String::from_utf8(completion_script(Shell::Bash)).unwrap();
    assert!(script.contains("hive"));
}

#[test]
fn cli_parses_categories_and_format_actions() {
    let cli = Cli::try_parse_from(["hive", "add", "--category", "idea", "Hello"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Add {
            category: Category::Idea,
            ..
        })
    ));

    let cli = Cli::try_parse_from(["hive", "draft", "format", "strike", "--start", "0"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Draft {
            command: DraftCommands::Format {
                action: FormatAction::Strikethrough,
                start: Some(0),
                end: None,
            }
        })
    ));

    assert!(Cli::try_parse_from(["hive", "add", "--category", "shopping", "x"]).is_err());
}

#[test]
fn draft_commands_edit_the_saved_draft() {
    let drafts = MemoryDraftStore::new();
    assert_eq!(draft(DraftCommands::Show, &drafts, ""), "No draft saved\n");

    let output = draft(
        DraftCommands::Set {
            text: vec!["*".to_string(), "Buy".to_string(), "milk".to_string()],
        },
        &drafts,
        "",
    );
    assert_eq!(output, "Draft Saved 🍯\n");

    let output = draft(DraftCommands::Newline { at: None }, &drafts, "");
    assert_eq!(output, "* Buy milk\n* \n");
    assert_eq!(drafts.load().unwrap().as_deref(), Some("* Buy milk\n* "));
}

#[test]
fn draft_format_moves_done_items() {
    let drafts = MemoryDraftStore::new();
    drafts.save("* Buy milk\n* Walk the dog").unwrap();

    draft(
        DraftCommands::Format {
            action: FormatAction::Strikethrough,
            start: Some(0),
            end: Some(10),
        },
        &drafts,
        "",
    );
    assert_eq!(
        drafts.load().unwrap().unwrap(),
        format!("* Walk the dog\n\n---\n{DONE_HEADER}\n~~* Buy milk~~")
    );
}

#[test]
fn draft_discard_respects_answer() {
    let drafts = MemoryDraftStore::new();
    drafts.save("precious").unwrap();

    let output = draft(DraftCommands::Discard { yes: false }, &drafts, "k\n");
    assert!(output.ends_with("Kept it\n"));
    assert_eq!(drafts.load().unwrap().as_deref(), Some("precious"));

    let output = draft(DraftCommands::Discard { yes: false }, &drafts, "confirm\n");
    assert!(output.ends_with("Draft discarded\n"));
    assert_eq!(drafts.load().unwrap(), None);

    let output = draft(DraftCommands::Discard { yes: true }, &drafts, "");
    assert_eq!(output, "No draft to discard\n");
}

#[tokio::test]
async fn add_note_saves_and_clears_draft() {
    let backend = backend_with_notes(&[]).await;
    let drafts = MemoryDraftStore::new();
    drafts.save("Hello **world**").unwrap();

    let mut screen = NotesScreen::new(drafts.clone());
    screen.restore_draft();
    let content = screen.composer().text.clone();
    add_note(screen, &backend, content, Category::Idea, None)
        .await
        .unwrap();

    let stored = backend.stored_notes();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "Hello **world**");
    assert_eq!(stored[0].category, Category::Idea);
    assert_eq!(drafts.load().unwrap(), None);
}

#[tokio::test]
async fn add_note_requires_sign_in() {
    let backend = MemoryBackend::new();
    let screen = NotesScreen::new(MemoryDraftStore::new());
    let error = add_note(screen, &backend, "x".to_string(), Category::General, None)
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::NotSignedIn));
}

#[tokio::test]
async fn edit_note_updates_content_and_category() {
    let backend = backend_with_notes(&["first draft"]).await;
    let id = edit_note(&backend, "1", Some(Category::Heart), |initial| {
        assert_eq!(initial, "first draft");
        Ok(Some("final draft".to_string()))
    })
    .await
    .unwrap();

    assert_eq!(id, NoteId::new("1"));
    let stored = backend.stored_notes();
    assert_eq!(stored[0].content, "final draft");
    assert_eq!(stored[0].category, Category::Heart);
}

#[tokio::test]
async fn edit_note_rejects_emptied_content() {
    let backend = backend_with_notes(&["keep"]).await;
    let error = edit_note(&backend, "1", None, |_| Ok(None))
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::EmptyEditedContent));
    assert_eq!(backend.stored_notes()[0].content, "keep");
}

#[tokio::test]
async fn delete_asks_before_removing() {
    let backend = backend_with_notes(&["doomed"]).await;

    let mut output = Vec::new();
    run_delete(&backend, "1", false, &mut Cursor::new("k\n"), &mut output)
        .await
        .unwrap();
    assert!(String::from_utf8(output).unwrap().contains("Delete Note?"));
    assert_eq!(backend.stored_notes().len(), 1);

    let mut output = Vec::new();
    run_delete(&backend, "1", true, &mut Cursor::new(""), &mut output)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "1\n");
    assert!(backend.stored_notes().is_empty());
}

#[tokio::test]
async fn auth_login_validates_before_network() {
    let backend = MemoryBackend::new();
    let error = run_auth(
        AuthCommands::Login {
            email: String::new(),
            password: "honey".to_string(),
        },
        &backend,
    )
    .await
    .unwrap_err();
    assert_eq!(error.to_string(), "Emails and passwords please! 🍯");
}
