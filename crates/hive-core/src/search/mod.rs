//! Note list filtering and per-card expansion state.

use std::collections::HashMap;

use crate::models::{Note, NoteId};

/// Notes whose content contains `query`, ignoring case. An empty query keeps
/// every note. Order is preserved.
#[must_use]
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let query = query.to_lowercase();
    notes
        .iter()
        .filter(|note| note_matches_query(note, &query))
        .collect()
}

fn note_matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    note.content.to_lowercase().contains(query)
}

/// Expanded/collapsed flag per note card. Cards start collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<NoteId, bool>,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_expanded(&self, id: &NoteId) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flip one card and return its new state.
    pub fn toggle(&mut self, id: &NoteId) -> bool {
        let flag = self.expanded.entry(id.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Forget cards that are no longer listed.
    pub fn retain(&mut self, notes: &[Note]) {
        self.expanded
            .retain(|id, _| notes.iter().any(|note| &note.id == id));
    }
}
