//! Remote collaborators behind the screens.
//!
//! [`AuthBackend`] and [`NotesBackend`] are the seam between screen state and
//! the network. [`SupabaseBackend`] is the real implementation;
//! [`MemoryBackend`] keeps everything in process for tests and demos.

mod memory;

pub use memory::MemoryBackend;

use reqwest::Client;

use crate::auth::{
    AuthSession, AuthUser, SessionPersistence, SignUpOutcome, SupabaseAuthClient,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{NewNote, Note, NoteChanges, NoteId};
use crate::storage::SupabaseStorageClient;
use crate::store::SupabaseRestClient;

/// Account operations
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn sign_out(&self) -> Result<()>;
    /// The signed-in user, or `None` when there is no usable session.
    async fn current_user(&self) -> Result<Option<AuthUser>>;
}

/// Note row and attachment operations for the signed-in user
#[allow(async_fn_in_trait)]
pub trait NotesBackend {
    /// All notes, newest first.
    async fn fetch_notes(&self) -> Result<Vec<Note>>;
    async fn insert_note(&self, note: &NewNote) -> Result<()>;
    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<()>;
    async fn delete_note(&self, id: &NoteId) -> Result<()>;
    /// Store a file and return its public URL.
    async fn upload_attachment(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String>;
}

/// Supabase auth, rows and storage sharing one HTTP client
#[derive(Clone)]
pub struct SupabaseBackend<S: SessionPersistence> {
    auth: SupabaseAuthClient<S>,
    rest: SupabaseRestClient,
    storage: SupabaseStorageClient,
}

impl<S: SessionPersistence> SupabaseBackend<S> {
    pub fn new(config: &ClientConfig, sessions: S) -> Result<Self> {
        let client = Client::builder().build()?;
        let url = config.base_url();
        let anon_key = config.supabase_anon_key.as_str();

        Ok(Self {
            auth: SupabaseAuthClient::with_client(url, anon_key, sessions, client.clone())?,
            rest: SupabaseRestClient::new(url, anon_key, &config.notes_table, client.clone())?,
            storage: SupabaseStorageClient::new(
                url,
                anon_key,
                config.attachments_bucket.as_str(),
                client,
            )?,
        })
    }

    pub const fn auth(&self) -> &SupabaseAuthClient<S> {
        &self.auth
    }

    async fn session(&self) -> Result<AuthSession> {
        self.auth.restore_session().await?.ok_or(Error::NotSignedIn)
    }
}

impl<S: SessionPersistence> AuthBackend for SupabaseBackend<S> {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        Ok(self.auth.sign_up(email, password).await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self.auth.sign_in(email, password).await?;
        tracing::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        match self.auth.restore_session().await? {
            Some(session) => self.auth.sign_out(&session.access_token).await?,
            None => self.auth.store().clear_session()?,
        }
        tracing::info!("Signed out");
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        let Some(session) = self.auth.restore_session().await? else {
            return Ok(None);
        };
        let user = self.auth.fetch_user(&session.access_token).await?;
        if user.is_none() {
            tracing::warn!("Stored session was rejected; clearing it");
            self.auth.store().clear_session()?;
        }
        Ok(user)
    }
}

impl<S: SessionPersistence> NotesBackend for SupabaseBackend<S> {
    async fn fetch_notes(&self) -> Result<Vec<Note>> {
        let session = self.session().await?;
        let notes = self.rest.list_notes(&session.access_token).await?;
        tracing::debug!("Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn insert_note(&self, note: &NewNote) -> Result<()> {
        let session = self.session().await?;
        self.rest.insert_note(&session.access_token, note).await
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<()> {
        let session = self.session().await?;
        self.rest
            .update_note(&session.access_token, id, changes)
            .await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let session = self.session().await?;
        self.rest.delete_note(&session.access_token, id).await
    }

    async fn upload_attachment(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let session = self.session().await?;
        self.storage
            .upload(&session.access_token, file_name, content_type, bytes)
            .await?;
        Ok(self.storage.public_url(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;

    #[tokio::test]
    async fn signed_out_backend_reports_no_user() {
        let backend =
            SupabaseBackend::new(&ClientConfig::default(), MemorySessionStore::new()).unwrap();
        assert_eq!(backend.current_user().await.unwrap(), None);
        assert!(matches!(
            backend.fetch_notes().await,
            Err(Error::NotSignedIn)
        ));
    }

    #[test]
    fn rejects_invalid_url() {
        let config = ClientConfig {
            supabase_url: "not-a-url".to_string(),
            ..ClientConfig::default()
        };
        assert!(SupabaseBackend::new(&config, MemorySessionStore::new()).is_err());
    }
}
