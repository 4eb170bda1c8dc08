//! Error types for hive-core

use thiserror::Error;

use crate::auth::AuthError;

/// Result type alias using hive-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hive-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// An operation needed a signed-in user and there was none
    #[error("Not signed in")]
    NotSignedIn,

    /// Auth client error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Remote data store rejected a request
    #[error("Backend error: {0}")]
    Api(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File storage error
    #[error("Storage error: {0}")]
    Storage(String),
}
