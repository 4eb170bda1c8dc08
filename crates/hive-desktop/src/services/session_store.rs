//! Keeps the Supabase session in the OS keyring between launches.

use hive_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use keyring::Entry;

const SERVICE: &str = "hive";
const SESSION_USERNAME: &str = "supabase_session";

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringSessionStore;

fn secure_storage(error: keyring::Error) -> AuthError {
    AuthError::SecureStorage(error.to_string())
}

fn session_entry() -> AuthResult<Entry> {
    Entry::new(SERVICE, SESSION_USERNAME).map_err(secure_storage)
}

impl SessionPersistence for KeyringSessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        match session_entry()?.get_password() {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(secure_storage(error)),
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        session_entry()?.set_password(&raw).map_err(secure_storage)
    }

    fn clear_session(&self) -> AuthResult<()> {
        match session_entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(secure_storage(error)),
        }
    }
}
