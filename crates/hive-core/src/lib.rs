//! hive-core - Core library for Hive
//!
//! This crate contains the note models, the markdown list editor, draft
//! persistence, screen state and the Supabase clients shared by the Hive
//! front-ends (desktop and CLI).

pub mod auth;
pub mod auth_screen;
pub mod backend;
pub mod config;
pub mod dialog;
pub mod draft;
pub mod editor;
pub mod error;
pub mod models;
pub mod screen;
pub mod search;
pub mod storage;
pub mod store;
mod util;

pub use error::{Error, Result};
pub use models::{Category, Note, NoteId};
