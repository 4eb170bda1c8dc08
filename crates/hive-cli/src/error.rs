use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(hive_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Edited note content cannot be empty")]
    EmptyEditedContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Position {position} is past the end of the draft ({length} characters)")]
    InvalidPosition { position: usize, length: usize },
    #[error("Not signed in. Run `hive auth login --email <EMAIL> --password <PASSWORD>` first.")]
    NotSignedIn,
}

impl From<hive_core::Error> for CliError {
    fn from(error: hive_core::Error) -> Self {
        match error {
            hive_core::Error::NotSignedIn => Self::NotSignedIn,
            other => Self::Core(other),
        }
    }
}
