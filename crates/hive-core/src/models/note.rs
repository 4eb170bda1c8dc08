//! Note model

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::Category;

/// Notes longer than this many lines get a collapse/expand toggle.
pub const COLLAPSED_MAX_LINES: usize = 5;
/// Notes longer than this many characters get a collapse/expand toggle.
pub const COLLAPSED_MAX_CHARS: usize = 150;

/// Opaque note identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The backing column may be a uuid or a bigint.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// A note row as returned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Markdown content
    #[serde(default)]
    pub content: String,
    /// Owning user
    pub user_id: String,
    #[serde(default)]
    pub category: Category,
    pub created_at: DateTime<Utc>,
    /// Public URL of the attached file, if any
    #[serde(default)]
    pub file_url: Option<String>,
}

impl Note {
    /// Whether the rendered card should offer the expand toggle.
    #[must_use]
    pub fn needs_expansion(&self) -> bool {
        needs_expansion(&self.content)
    }

    #[must_use]
    pub fn attachment(&self) -> Option<Attachment<'_>> {
        self.file_url.as_deref().map(Attachment::from_url)
    }

    /// Apply an update in place, as done after a successful remote update.
    pub fn apply_changes(&mut self, changes: &NoteChanges) {
        self.content.clone_from(&changes.content);
        self.category = changes.category;
        self.file_url.clone_from(&changes.file_url);
    }
}

/// Insert payload for a new note row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub content: String,
    pub category: Category,
    pub file_url: Option<String>,
    pub user_id: String,
    /// The table carries a title column; the client always fills it with `Note`.
    pub title: &'static str,
}

impl NewNote {
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        category: Category,
        file_url: Option<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            category,
            file_url,
            user_id: user_id.into(),
            title: "Note",
        }
    }
}

/// Update payload for an existing note row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteChanges {
    pub content: String,
    pub category: Category,
    /// Serialized as `null` when cleared so the column is reset remotely.
    pub file_url: Option<String>,
}

/// How an attached file should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment<'a> {
    Image(&'a str),
    Document(&'a str),
}

impl<'a> Attachment<'a> {
    #[must_use]
    pub fn from_url(url: &'a str) -> Self {
        if image_url_regex().is_match(url) {
            Self::Image(url)
        } else {
            Self::Document(url)
        }
    }

    #[must_use]
    pub const fn url(self) -> &'a str {
        match self {
            Self::Image(url) | Self::Document(url) => url,
        }
    }
}

fn image_url_regex() -> &'static Regex {
    static IMAGE_URL: OnceLock<Regex> = OnceLock::new();
    IMAGE_URL.get_or_init(|| Regex::new(r"(?i)\.(jpeg|jpg|gif|png|webp)$").expect("Invalid regex"))
}

/// Whether content exceeds the collapsed card size (more than 5 lines or
/// more than 150 characters).
///
/// Characters are UTF-16 code units, the unit the web text area counts in,
/// so an emoji outside the BMP counts as two.
#[must_use]
pub fn needs_expansion(content: &str) -> bool {
    content.split('\n').count() > COLLAPSED_MAX_LINES
        || content.encode_utf16().count() > COLLAPSED_MAX_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> &'static str {
        r#"{
            "id": "6f1c2d3e-0000-4000-8000-000000000001",
            "content": "Buy Honey",
            "user_id": "user-1",
            "category": "todo",
            "created_at": "2024-05-01T12:34:56.789+00:00",
            "file_url": null,
            "title": "Note"
        }"#
    }

    #[test]
    fn deserializes_remote_row() {
        let note: Note = serde_json::from_str(sample_row()).unwrap();
        assert_eq!(note.id.as_str(), "6f1c2d3e-0000-4000-8000-000000000001");
        assert_eq!(note.category, Category::Todo);
        assert_eq!(note.file_url, None);
        assert_eq!(note.created_at.timestamp(), 1_714_566_896);
    }

    #[test]
    fn numeric_ids_become_opaque_strings() {
        let note: Note = serde_json::from_str(
            r#"{"id": 42, "content": "x", "user_id": "u", "created_at": "2024-05-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(note.id, NoteId::new("42"));
        assert_eq!(note.category, Category::General);
    }

    #[test]
    fn new_note_payload_carries_constant_title() {
        let payload = NewNote::new("Hello", Category::Idea, None, "user-1");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["title"], "Note");
        assert_eq!(value["category"], "idea");
        assert!(value["file_url"].is_null());
    }

    #[test]
    fn needs_expansion_counts_lines_and_chars() {
        assert!(!needs_expansion("one\ntwo\nthree\nfour\nfive"));
        assert!(needs_expansion("1\n2\n3\n4\n5\n6"));
        assert!(!needs_expansion(&"a".repeat(150)));
        assert!(needs_expansion(&"a".repeat(151)));
    }

    #[test]
    fn needs_expansion_counts_emoji_as_two_units() {
        assert!(!needs_expansion(&"🍯".repeat(75)));
        assert!(needs_expansion(&"🍯".repeat(76)));
    }

    #[test]
    fn attachment_kind_follows_extension() {
        assert_eq!(
            Attachment::from_url("https://x/y/0.123.PNG"),
            Attachment::Image("https://x/y/0.123.PNG")
        );
        assert_eq!(
            Attachment::from_url("https://x/y/report.pdf"),
            Attachment::Document("https://x/y/report.pdf")
        );
    }

    #[test]
    fn apply_changes_patches_in_place() {
        let mut note: Note = serde_json::from_str(sample_row()).unwrap();
        note.apply_changes(&NoteChanges {
            content: "Buy more honey".to_string(),
            category: Category::Heart,
            file_url: Some("https://x/a.png".to_string()),
        });
        assert_eq!(note.content, "Buy more honey");
        assert_eq!(note.category, Category::Heart);
        assert_eq!(note.user_id, "user-1");
    }
}
