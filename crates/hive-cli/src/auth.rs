//! Keychain-backed session store and backend construction.

use hive_core::auth::{AuthResult, AuthSession, SessionPersistence};
use hive_core::backend::SupabaseBackend;
use hive_core::config::ClientConfig;

use crate::error::CliError;

pub type CliBackend = SupabaseBackend<SessionStore>;

/// The serialized session, kept in a single OS keychain entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

impl SessionPersistence for SessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        match keychain::read()? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        keychain::write(&serde_json::to_string(session)?)
    }

    fn clear_session(&self) -> AuthResult<()> {
        keychain::remove()
    }
}

#[cfg(not(test))]
mod keychain {
    use hive_core::auth::{AuthError, AuthResult};
    use keyring::Entry;

    const SERVICE: &str = "hive";
    const ACCOUNT: &str = "supabase_session";

    fn storage_error(error: keyring::Error) -> AuthError {
        AuthError::SecureStorage(error.to_string())
    }

    fn entry() -> AuthResult<Entry> {
        Entry::new(SERVICE, ACCOUNT).map_err(storage_error)
    }

    pub fn read() -> AuthResult<Option<String>> {
        match entry()?.get_password() {
            Ok(raw) => Ok(Some(raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(storage_error(error)),
        }
    }

    pub fn write(raw: &str) -> AuthResult<()> {
        entry()?.set_password(raw).map_err(storage_error)
    }

    pub fn remove() -> AuthResult<()> {
        match entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(storage_error(error)),
        }
    }
}

// Unit tests never touch the real keychain.
#[cfg(test)]
mod keychain {
    use std::sync::{Mutex, MutexGuard};

    use hive_core::auth::{AuthError, AuthResult};

    static SLOT: Mutex<Option<String>> = Mutex::new(None);

    fn slot() -> AuthResult<MutexGuard<'static, Option<String>>> {
        SLOT.lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }

    pub fn read() -> AuthResult<Option<String>> {
        Ok(slot()?.clone())
    }

    pub fn write(raw: &str) -> AuthResult<()> {
        *slot()? = Some(raw.to_string());
        Ok(())
    }

    pub fn remove() -> AuthResult<()> {
        *slot()? = None;
        Ok(())
    }
}

/// Backend for the compiled-in project, honoring `HIVE_SUPABASE_*` overrides.
pub fn connect() -> Result<CliBackend, CliError> {
    let config = ClientConfig::from_env().map_err(CliError::Config)?;
    tracing::debug!("Using Supabase project at {}", config.base_url());
    Ok(SupabaseBackend::new(&config, SessionStore)?)
}

#[cfg(test)]
mod tests {
    use hive_core::auth::AuthUser;

    use super::*;

    #[test]
    fn session_store_roundtrips_and_clears() {
        let store = SessionStore;
        let session = AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: Some("bee@hive.test".to_string()),
            },
        };

        store.save_session(&session).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(session));
        store.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
    }
}
