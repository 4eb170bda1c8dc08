use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use hive_core::auth::AuthUser;
use hive_core::backend::AuthBackend;
use hive_core::dialog::{Confirmation, CANCEL_LABEL, CONFIRM_LABEL};
use hive_core::draft::FileDraftStore;
use hive_core::models::{needs_expansion, Attachment, COLLAPSED_MAX_CHARS, COLLAPSED_MAX_LINES};
use hive_core::screen::EXPAND_LABEL;
use hive_core::{Note, NoteId};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub category: String,
    pub badge: String,
    pub preview: String,
    pub content: String,
    pub created_at: String,
    pub relative_time: String,
    pub file_url: Option<String>,
}

/// Where the content of a new note came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Arguments,
    Stdin,
    /// Typed in `$EDITOR`, which starts from the saved draft
    Editor,
}

pub async fn require_signed_in<B: AuthBackend>(backend: &B) -> Result<AuthUser, CliError> {
    backend.current_user().await?.ok_or(CliError::NotSignedIn)
}

pub fn open_drafts() -> Result<FileDraftStore, CliError> {
    Ok(FileDraftStore::open_default()?)
}

/// Resolve an exact note ID or a unique ID prefix among `notes`.
pub fn resolve_note_for_edit(note_query: &str, notes: &[Note]) -> Result<NoteId, CliError> {
    if let Some(note) = notes.iter().find(|note| note.id.as_str() == note_query) {
        return Ok(note.id.clone());
    }

    let matching_ids = notes
        .iter()
        .filter(|note| note.id.as_str().starts_with(note_query))
        .map(|note| note.id.clone())
        .collect::<Vec<_>>();

    match matching_ids.len() {
        0 => Err(CliError::NoteNotFound(note_query.to_string())),
        1 => Ok(matching_ids[0].clone()),
        _ => {
            let options = matching_ids
                .iter()
                .take(3)
                .map(|id| short_id(id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(13).collect()
}

/// One block per note: a header line, then the (possibly collapsed) content
/// and attachment indented underneath.
pub fn format_note_lines(notes: &[&Note], full: bool) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    let mut lines = Vec::new();

    for note in notes {
        let short_id = short_id(&note.id);
        let badge = note.category.badge();
        let date = note.created_at.format("%Y-%m-%d");
        let relative_time = format_relative_time(note.created_at.timestamp_millis(), now_ms);
        lines.push(format!("{short_id:<13}  {badge:<10}  {date}  {relative_time}"));

        let body = if full {
            note.content.clone()
        } else {
            collapsed_content(&note.content)
        };
        lines.extend(body.lines().map(|line| format!("    {line}")));
        if !full && note.needs_expansion() {
            lines.push(format!("    [{EXPAND_LABEL}: hive list --full]"));
        }

        match note.attachment() {
            Some(Attachment::Image(url)) => lines.push(format!("    🖼  {url}")),
            Some(Attachment::Document(url)) => {
                lines.push(format!("    View Document 📎 {url}"));
            }
            None => {}
        }
        lines.push(String::new());
    }

    lines
}

/// Content cut down to the collapsed card size.
pub fn collapsed_content(content: &str) -> String {
    if !needs_expansion(content) {
        return content.to_string();
    }

    let mut collapsed = content
        .split('\n')
        .take(COLLAPSED_MAX_LINES)
        .collect::<Vec<_>>()
        .join("\n");
    if collapsed.chars().count() > COLLAPSED_MAX_CHARS {
        collapsed = collapsed.chars().take(COLLAPSED_MAX_CHARS).collect();
    }
    collapsed.push_str("...");
    collapsed
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    NoteListItem {
        id: note.id.to_string(),
        category: note.category.id().to_string(),
        badge: note.category.badge(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        created_at: note.created_at.to_rfc3339(),
        relative_time: format_relative_time(note.created_at.timestamp_millis(), now_ms),
        file_url: note.file_url.clone(),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Largest unit first; anything under a minute is "just now".
const RELATIVE_UNITS: [(i64, &str); 6] = [
    (365 * DAY_MS, "y"),
    (30 * DAY_MS, "mo"),
    (7 * DAY_MS, "w"),
    (DAY_MS, "d"),
    (HOUR_MS, "h"),
    (MINUTE_MS, "m"),
];

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let elapsed = now_ms.saturating_sub(timestamp_ms);
    RELATIVE_UNITS
        .iter()
        .find(|(unit, _)| elapsed >= *unit)
        .map_or_else(
            || "just now".to_string(),
            |(unit, suffix)| format!("{}{suffix} ago", elapsed / unit),
        )
}

/// Show a confirmation prompt and read the answer.
///
/// Anything other than an explicit confirm keeps things as they are.
pub fn prompt_confirmation<A>(
    confirmation: &Confirmation<A>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    writeln!(output, "{}", confirmation.title)?;
    writeln!(output, "{}", confirmation.message)?;
    write!(output, "[k] {CANCEL_LABEL} / [c] {CONFIRM_LABEL}: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "c" | "confirm" | "y" | "yes"
    ))
}

/// Byte offset of the `position`-th character of `text`.
pub fn char_to_byte(text: &str, position: usize) -> Result<usize, CliError> {
    if position == 0 {
        return Ok(0);
    }
    text.char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .nth(position)
        .ok_or_else(|| CliError::InvalidPosition {
            position,
            length: text.chars().count(),
        })
}

/// Content for a new note: arguments, then piped stdin, then `$EDITOR`
/// opened on `draft`.
pub fn resolve_note_content(
    content_parts: &[String],
    draft: &str,
) -> Result<(String, ContentSource), CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok((content, ContentSource::Arguments));
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok((content, ContentSource::Stdin));
    }

    if let Some(content) = capture_editor_input_with_initial(draft)? {
        return Ok((content, ContentSource::Editor));
    }

    Err(CliError::EmptyContent)
}

/// Note text as typed, or `None` when it is only whitespace.
///
/// Leading indentation is kept. Only the line breaks that pipes and editors
/// leave after the last line are dropped.
pub fn normalize_content(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        None
    } else {
        Some(content.trim_end_matches(['\n', '\r']).to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

/// Open the preferred editor on a scratch file holding `initial_content`
/// and return what was saved.
pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let scratch = scratch_note_path();
    std::fs::write(&scratch, initial_content)?;

    let edited = run_editor(&preferred_editor(), &scratch)
        .and_then(|()| std::fs::read_to_string(&scratch).map_err(CliError::from));
    if let Err(error) = std::fs::remove_file(&scratch) {
        tracing::debug!("Failed to remove {}: {}", scratch.display(), error);
    }
    Ok(normalize_content(&edited?))
}

/// Run an editor command line such as `code --wait` on `file_path`.
fn run_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| CliError::EditorFailed("empty EDITOR command".into()))?;

    let status = Command::new(program).args(words).arg(file_path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        )))
    }
}

fn preferred_editor() -> String {
    ["VISUAL", "EDITOR"]
        .into_iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn scratch_note_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.subsec_nanos());
    env::temp_dir().join(format!("hive-draft-{}-{nanos}.md", std::process::id()))
}
