//! Data models for Hive

mod category;
mod note;

pub use category::{Category, UnknownCategory};
pub use note::{
    needs_expansion, Attachment, NewNote, Note, NoteChanges, NoteId, COLLAPSED_MAX_CHARS,
    COLLAPSED_MAX_LINES,
};
