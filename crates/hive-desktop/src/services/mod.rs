//! Application services
//!
//! Backend construction and the keyring-backed session store.

mod session_store;

use hive_core::backend::SupabaseBackend;
use hive_core::config::ClientConfig;
use hive_core::draft::FileDraftStore;

pub use session_store::KeyringSessionStore;

pub type DesktopBackend = SupabaseBackend<KeyringSessionStore>;

/// Backend for the compiled-in project, honoring `HIVE_SUPABASE_*` overrides.
pub fn connect_backend() -> Result<DesktopBackend, String> {
    let config = ClientConfig::from_env()?;
    tracing::debug!("Using Supabase project at {}", config.base_url());
    SupabaseBackend::new(&config, KeyringSessionStore).map_err(|error| error.to_string())
}

/// Draft storage in the platform data directory, falling back to the temp
/// directory when that cannot be resolved.
pub fn open_draft_store() -> FileDraftStore {
    FileDraftStore::open_default().unwrap_or_else(|error| {
        tracing::warn!("Falling back to a temporary draft directory: {}", error);
        FileDraftStore::new(std::env::temp_dir().join("hive"))
    })
}
