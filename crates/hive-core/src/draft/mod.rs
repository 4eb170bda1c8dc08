//! Device-local draft persistence.
//!
//! The unsaved composer text is mirrored to a single key so it survives a
//! reload. Storage here is best-effort: failures are logged and never block
//! the user.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Key holding the latest unsaved draft text.
pub const DRAFT_KEY: &str = "note-draft";

/// Environment variable overriding the directory used by [`FileDraftStore`].
pub const DATA_DIR_ENV: &str = "HIVE_DATA_DIR";

/// Key/value storage for the draft text
pub trait DraftStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, text: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Draft store writing one file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    /// Store the draft under `dir/<key>`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DRAFT_KEY),
        }
    }

    /// Store under `HIVE_DATA_DIR` or the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_data_dir()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// In-memory draft store; clones share the same storage, which makes it handy
/// for simulating a reload in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Arc<Mutex<HashMap<&'static str, String>>>,
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<&'static str, String>>> {
        self.entries
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock()?.get(DRAFT_KEY).cloned())
    }

    fn save(&self, text: &str) -> Result<()> {
        self.lock()?.insert(DRAFT_KEY, text.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.remove(DRAFT_KEY);
        Ok(())
    }
}

impl<T: DraftStore + ?Sized> DraftStore for Box<T> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, text: &str) -> Result<()> {
        (**self).save(text)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Best-effort mirror of the composer text into a [`DraftStore`].
///
/// Nothing is mirrored while an existing note is being edited.
#[derive(Debug, Clone)]
pub struct DraftAutosave<S: DraftStore> {
    store: S,
}

impl<S: DraftStore> DraftAutosave<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Stored draft to preload on mount, unless an edit is in progress.
    pub fn restore(&self, editing: bool) -> Option<String> {
        if editing {
            return None;
        }
        match self.store.load() {
            Ok(draft) => draft.filter(|text| !text.is_empty()),
            Err(error) => {
                tracing::warn!("Failed to restore stored draft: {}", error);
                None
            }
        }
    }

    /// Overwrite the stored draft with the current text.
    pub fn record(&self, text: &str, editing: bool) {
        if editing {
            return;
        }
        if let Err(error) = self.store.save(text) {
            tracing::warn!("Failed to store draft: {}", error);
        }
    }

    pub fn clear(&self) {
        if let Err(error) = self.store.clear() {
            tracing::warn!("Failed to clear stored draft: {}", error);
        }
    }
}

/// Directory holding device-local client state.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("hive"))
        .ok_or_else(|| Error::Storage("Failed to resolve data directory".to_string()))
}
