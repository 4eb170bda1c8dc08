//! Markdown list-aware text editing helpers.
//!
//! Every operation is a pure text transformation: it takes the draft text and
//! the current selection and returns the new text plus where the cursor should
//! land. Offsets are byte offsets into the text; front-ends that speak UTF-16
//! (web text areas) convert with the helpers in [`offsets`].

pub mod offsets;

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Header of the section collecting completed list items.
pub const DONE_HEADER: &str = "### 🍯 DONE & DUSTED";

const BULLET_MARKER: &str = "* ";

/// A selection in the draft text, as byte offsets.
///
/// `start == end` is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Order the bounds and snap them onto char boundaries inside `text`.
    #[must_use]
    pub fn clamp_to(self, text: &str) -> Self {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self {
            start: floor_char_boundary(text, start),
            end: floor_char_boundary(text, end),
        }
    }
}

/// Result of an editing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    /// Byte offset of the caret after the edit
    pub cursor: usize,
}

/// Toolbar formatting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatAction {
    Bold,
    Italic,
    Strikethrough,
    Bullet,
    Numbered,
}

impl FromStr for FormatAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "strike" | "strikethrough" => Ok(Self::Strikethrough),
            "bullet" => Ok(Self::Bullet),
            "number" | "numbered" => Ok(Self::Numbered),
            other => Err(format!("unknown format action '{other}'")),
        }
    }
}

/// Prefix the next line should start with when a newline is typed at
/// `cursor`, or `None` when the current line is not a list item.
#[must_use]
pub fn list_continuation(text: &str, cursor: usize) -> Option<String> {
    let cursor = floor_char_boundary(text, cursor);
    let current_line = text[..cursor].rsplit('\n').next().unwrap_or_default();

    if current_line.trim().starts_with(BULLET_MARKER) {
        return Some(BULLET_MARKER.to_string());
    }

    let captures = ordered_marker_regex().captures(current_line)?;
    let number = captures[1].parse::<u64>().ok()?.checked_add(1)?;
    Some(format!("{number}. "))
}

/// Continue a list at `cursor`: insert a newline followed by the list marker.
///
/// Returns `None` when the current line is not a list item, in which case the
/// caller should let a plain newline happen.
#[must_use]
pub fn continue_list(text: &str, cursor: usize) -> Option<Edit> {
    let cursor = floor_char_boundary(text, cursor);
    let continuation = list_continuation(text, cursor)?;

    let mut updated = String::with_capacity(text.len() + continuation.len() + 1);
    updated.push_str(&text[..cursor]);
    updated.push('\n');
    updated.push_str(&continuation);
    updated.push_str(&text[cursor..]);

    Some(Edit {
        text: updated,
        cursor: cursor + 1 + continuation.len(),
    })
}

/// Newline keystroke: list continuation when applicable, otherwise a plain
/// newline replacing the selection.
#[must_use]
pub fn insert_newline(text: &str, selection: Selection) -> Edit {
    let selection = selection.clamp_to(text);
    if let Some(edit) = continue_list(text, selection.start) {
        return edit;
    }

    let mut updated = String::with_capacity(text.len() + 1);
    updated.push_str(&text[..selection.start]);
    updated.push('\n');
    updated.push_str(&text[selection.end..]);
    Edit {
        text: updated,
        cursor: selection.start + 1,
    }
}

/// Apply a toolbar formatting action to the selection.
#[must_use]
pub fn apply_format(text: &str, selection: Selection, action: FormatAction) -> Edit {
    let selection = selection.clamp_to(text);
    let selected = &text[selection.start..selection.end];

    let (before, after) = match action {
        FormatAction::Bold => ("**".to_string(), "**"),
        FormatAction::Italic => ("*".to_string(), "*"),
        FormatAction::Strikethrough => {
            if is_list_item(selected) {
                return mark_done(text, selection);
            }
            ("~~".to_string(), "~~")
        }
        FormatAction::Bullet => (
            format!("{}{BULLET_MARKER}", line_break_prefix(text, selection.start)),
            "",
        ),
        FormatAction::Numbered => (
            format!(
                "{}{}. ",
                line_break_prefix(text, selection.start),
                next_list_number(text)
            ),
            "",
        ),
    };

    let mut updated = String::with_capacity(text.len() + before.len() + after.len());
    updated.push_str(&text[..selection.start]);
    updated.push_str(&before);
    updated.push_str(selected);
    updated.push_str(after);
    updated.push_str(&text[selection.end..]);

    let cursor = if selected.is_empty() {
        selection.start + before.len()
    } else {
        selection.start + before.len() + selected.len() + after.len()
    };

    Edit {
        text: updated,
        cursor,
    }
}

/// Smallest positive integer not already used as a numbered-list marker
/// anywhere in the text, struck-through items included.
///
/// The first `N.` on each line counts, wherever it sits in the line.
#[must_use]
pub fn next_list_number(text: &str) -> u64 {
    let used = text
        .lines()
        .filter_map(|line| existing_marker_regex().captures(line))
        .filter_map(|captures| captures[1].parse::<u64>().ok())
        .collect::<HashSet<_>>();

    let mut next = 1;
    while used.contains(&next) {
        next += 1;
    }
    next
}

/// Whether a selection is a single list item (`* ...` or `N. ...`).
#[must_use]
pub fn is_list_item(selection: &str) -> bool {
    let trimmed = selection.trim();
    trimmed.starts_with(BULLET_MARKER) || ordered_marker_regex().is_match(trimmed)
}

/// Move the selected list item into the done section at the end of the text.
///
/// The selection is cut out, blank-line gaps left behind are collapsed, and
/// the item is appended struck through under [`DONE_HEADER`], which is created
/// when missing.
#[must_use]
pub fn mark_done(text: &str, selection: Selection) -> Edit {
    let selection = selection.clamp_to(text);
    let selected = &text[selection.start..selection.end];

    let remaining = format!("{}{}", &text[..selection.start], &text[selection.end..]);
    let collapsed = blank_gap_regex().replace_all(&remaining, "\n");
    let cleaned = collapsed.trim();
    let completed = format!("~~{}~~", selected.trim());

    let updated = if cleaned.contains(DONE_HEADER) {
        format!("{cleaned}\n{completed}")
    } else if cleaned.is_empty() {
        format!("{DONE_HEADER}\n{completed}")
    } else {
        format!("{cleaned}\n\n---\n{DONE_HEADER}\n{completed}")
    };

    let cursor = updated.len();
    Edit {
        text: updated,
        cursor,
    }
}

fn line_break_prefix(text: &str, position: usize) -> &'static str {
    if position == 0 || text[..position].ends_with('\n') {
        ""
    } else {
        "\n"
    }
}

pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ordered_marker_regex() -> &'static Regex {
    static ORDERED_MARKER: OnceLock<Regex> = OnceLock::new();
    ORDERED_MARKER.get_or_init(|| Regex::new(r"^([0-9]+)\.\s").expect("Invalid regex"))
}

fn existing_marker_regex() -> &'static Regex {
    static EXISTING_MARKER: OnceLock<Regex> = OnceLock::new();
    EXISTING_MARKER
        .get_or_init(|| Regex::new(r"(?:~~)?([0-9]+)\.").expect("Invalid regex"))
}

fn blank_gap_regex() -> &'static Regex {
    static BLANK_GAP: OnceLock<Regex> = OnceLock::new();
    BLANK_GAP.get_or_init(|| Regex::new(r"\n\s*\n").expect("Invalid regex"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn select(text: &str, needle: &str) -> Selection {
        let start = text.find(needle).unwrap();
        Selection::new(start, start + needle.len())
    }

    #[test]
    fn bullet_line_continues_with_bullet() {
        for text in ["* x", "* Buy milk", "  * indented"] {
            let edit = continue_list(text, text.len()).unwrap();
            assert_eq!(edit.text, format!("{text}\n* "));
            assert_eq!(edit.cursor, edit.text.len());
        }
    }

    #[test]
    fn numbered_line_continues_with_next_number() {
        let edit = continue_list("1. first", 8).unwrap();
        assert_eq!(edit.text, "1. first\n2. ");
        assert_eq!(edit.cursor, 12);

        let text = "shopping\n41. eggs";
        let edit = continue_list(text, text.len()).unwrap();
        assert_eq!(edit.text, "shopping\n41. eggs\n42. ");
    }

    #[test]
    fn plain_line_has_no_continuation() {
        assert_eq!(list_continuation("just text", 9), None);
        assert_eq!(list_continuation("*bold*", 6), None);
        assert_eq!(list_continuation("1.5 litres", 10), None);
        assert_eq!(list_continuation("", 0), None);

        let edit = insert_newline("just text", Selection::caret(4));
        assert_eq!(edit.text, "just\n text");
        assert_eq!(edit.cursor, 5);
    }

    #[test]
    fn continuation_only_looks_at_text_before_cursor() {
        // Cursor right after "* a" on the first line.
        let text = "* a\nplain";
        let edit = continue_list(text, 3).unwrap();
        assert_eq!(edit.text, "* a\n* \nplain");
        assert_eq!(edit.cursor, 6);

        // Cursor on the plain second line.
        assert_eq!(list_continuation(text, text.len()), None);
    }

    #[test]
    fn numbered_continuation_requires_marker_at_line_start() {
        assert_eq!(list_continuation(" 1. indented", 12), None);
    }

    #[test]
    fn wrap_selection_touches_only_the_selection() {
        let text = "say hello world";
        let selection = select(text, "hello");

        let bold = apply_format(text, selection, FormatAction::Bold);
        assert_eq!(bold.text, "say **hello** world");
        assert_eq!(bold.cursor, "say **hello**".len());

        let italic = apply_format(text, selection, FormatAction::Italic);
        assert_eq!(italic.text, "say *hello* world");

        let strike = apply_format(text, selection, FormatAction::Strikethrough);
        assert_eq!(strike.text, "say ~~hello~~ world");
    }

    #[test]
    fn wrap_without_selection_leaves_cursor_between_delimiters() {
        let edit = apply_format("ab", Selection::caret(1), FormatAction::Bold);
        assert_eq!(edit.text, "a****b");
        assert_eq!(edit.cursor, 3);

        let edit = apply_format("ab", Selection::caret(2), FormatAction::Strikethrough);
        assert_eq!(edit.text, "ab~~~~");
        assert_eq!(edit.cursor, 4);
    }

    #[test]
    fn bullet_insertion_starts_a_new_line_when_needed() {
        let edit = apply_format("", Selection::caret(0), FormatAction::Bullet);
        assert_eq!(edit.text, "* ");
        assert_eq!(edit.cursor, 2);

        let edit = apply_format("todo", Selection::caret(4), FormatAction::Bullet);
        assert_eq!(edit.text, "todo\n* ");
        assert_eq!(edit.cursor, 7);

        let edit = apply_format("todo\n", Selection::caret(5), FormatAction::Bullet);
        assert_eq!(edit.text, "todo\n* ");
    }

    #[test]
    fn numbered_insertion_picks_smallest_unused_marker() {
        let text = "1. a\n2. b\n4. d";
        assert_eq!(next_list_number(text), 3);

        let edit = apply_format(text, Selection::caret(text.len()), FormatAction::Numbered);
        assert_eq!(edit.text, "1. a\n2. b\n4. d\n3. ");
        assert_eq!(edit.cursor, edit.text.len());
    }

    #[test]
    fn numbered_insertion_counts_done_items() {
        let text = "2. b\n\n---\n### 🍯 DONE & DUSTED\n~~1. a~~";
        assert_eq!(next_list_number(text), 3);
        assert_eq!(next_list_number("no markers here"), 1);
        assert_eq!(next_list_number("version 1.0 shipped"), 2);
    }

    #[test]
    fn next_list_number_counts_markers_inside_a_line() {
        assert_eq!(next_list_number("* 1. nested"), 2);
        assert_eq!(next_list_number("Step 1. mix\nStep 2. bake"), 3);
        assert_eq!(next_list_number("2. first\nsee 1. and 3. above"), 3);
    }

    #[test]
    fn strike_on_list_item_moves_it_to_done_section() {
        let text = "Shopping\n* Buy milk\n* Eggs";
        let edit = apply_format(text, select(text, "* Buy milk"), FormatAction::Strikethrough);
        assert_eq!(
            edit.text,
            "Shopping\n* Eggs\n\n---\n### 🍯 DONE & DUSTED\n~~* Buy milk~~"
        );
        assert_eq!(edit.cursor, edit.text.len());
    }

    #[test]
    fn done_section_is_reused_when_present() {
        let text = "* Eggs\n\n---\n### 🍯 DONE & DUSTED\n~~* Buy milk~~";
        let edit = apply_format(text, select(text, "* Eggs"), FormatAction::Strikethrough);
        assert_eq!(
            edit.text,
            "---\n### 🍯 DONE & DUSTED\n~~* Buy milk~~\n~~* Eggs~~"
        );
    }

    #[test]
    fn done_section_starts_document_when_nothing_else_remains() {
        let text = "1. only item";
        let edit = mark_done(text, Selection::new(0, text.len()));
        assert_eq!(edit.text, "### 🍯 DONE & DUSTED\n~~1. only item~~");
    }

    #[test]
    fn offsets_snap_to_char_boundaries() {
        let text = "🍯x";
        let selection = Selection::new(5, 2).clamp_to(text);
        assert_eq!(selection, Selection::new(0, 5));
    }

    #[test]
    fn format_action_parses_cli_names() {
        assert_eq!("strike".parse::<FormatAction>(), Ok(FormatAction::Strikethrough));
        assert_eq!("number".parse::<FormatAction>(), Ok(FormatAction::Numbered));
        assert!("underline".parse::<FormatAction>().is_err());
    }
}
