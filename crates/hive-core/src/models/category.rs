//! Note categories

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed tag classifying a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Idea,
    Todo,
    Heart,
}

impl Category {
    /// Every category, in picker order.
    pub const ALL: [Self; 4] = [Self::General, Self::Idea, Self::Todo, Self::Heart];

    /// Identifier stored in the `category` column.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Idea => "idea",
            Self::Todo => "todo",
            Self::Heart => "heart",
        }
    }

    /// Display label shown on badges and the picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Idea => "Idea",
            Self::Todo => "Task",
            Self::Heart => "Sweet",
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::General => "🐾",
            Self::Idea => "💡",
            Self::Todo => "✅",
            Self::Heart => "💖",
        }
    }

    /// Badge background color.
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::General => "#745e86",
            Self::Idea => "#cfc694",
            Self::Todo => "#bbd6bc",
            Self::Heart => "#e2b3bc",
        }
    }

    /// Badge text color.
    #[must_use]
    pub const fn foreground(self) -> &'static str {
        match self {
            Self::Idea => "#78350F",
            Self::General | Self::Todo | Self::Heart => "#ffffff",
        }
    }

    /// Badge text, e.g. `💡 Idea`.
    #[must_use]
    pub fn badge(self) -> String {
        format!("{} {}", self.glyph(), self.label())
    }

    /// Map a stored identifier to a category, falling back to `General` for
    /// anything unknown.
    #[must_use]
    pub fn from_id_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown category identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected general, idea, todo or heart)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.id() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or_else(Self::default, Self::from_id_lenient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ids_case_insensitively() {
        assert_eq!("idea".parse::<Category>().unwrap(), Category::Idea);
        assert_eq!(" TODO ".parse::<Category>().unwrap(), Category::Todo);
        assert!("shopping".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_or_missing_category_falls_back_to_general() {
        let parsed: Category = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(parsed, Category::General);
        let parsed: Category = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Category::General);
    }

    #[test]
    fn serializes_as_lowercase_id() {
        assert_eq!(serde_json::to_string(&Category::Heart).unwrap(), "\"heart\"");
    }

    #[test]
    fn badge_uses_label_not_id() {
        assert_eq!(Category::Todo.badge(), "✅ Task");
    }
}
