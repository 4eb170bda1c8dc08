use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use super::{AuthBackend, NotesBackend};
use crate::auth::{AuthError, AuthSession, AuthUser, SignUpOutcome};
use crate::error::{Error, Result};
use crate::models::{NewNote, Note, NoteChanges, NoteId};

const PUBLIC_URL_PREFIX: &str = "memory://note-attachments/";

/// In-process backend. Clones share state.
///
/// Note timestamps advance one second per insert so ordering is stable.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    current: Option<AuthUser>,
    notes: Vec<Note>,
    next_id: u64,
    uploads: Vec<String>,
    fail_uploads: bool,
    fail_writes: bool,
    require_confirmation: bool,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: AuthUser,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with one registered account that is already signed in.
    #[must_use]
    pub fn signed_in(email: &str, password: &str) -> Self {
        let backend = Self::new();
        if let Ok(mut state) = backend.lock() {
            let user = state.register(email, password);
            state.current = Some(user);
        }
        backend
    }

    /// Make uploads fail until turned off again.
    pub fn set_fail_uploads(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_uploads = fail;
        }
    }

    /// Make inserts, updates and deletes fail until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_writes = fail;
        }
    }

    /// Sign-ups return no session, as with email confirmation enabled.
    pub fn set_require_confirmation(&self, require: bool) {
        if let Ok(mut state) = self.lock() {
            state.require_confirmation = require;
        }
    }

    /// Every stored note regardless of owner, in insertion order.
    #[must_use]
    pub fn stored_notes(&self) -> Vec<Note> {
        self.lock()
            .map(|state| state.notes.clone())
            .unwrap_or_default()
    }

    /// Names of uploaded files.
    #[must_use]
    pub fn uploads(&self) -> Vec<String> {
        self.lock()
            .map(|state| state.uploads.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))
    }

    fn signed_in_user(&self) -> Result<AuthUser> {
        self.lock()?.current.clone().ok_or(Error::NotSignedIn)
    }
}

impl MemoryState {
    fn register(&mut self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: format!("user-{}", self.accounts.len() + 1),
            email: Some(email.to_string()),
        };
        self.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    fn session_for(user: AuthUser) -> AuthSession {
        AuthSession {
            access_token: format!("token-{}", user.id),
            refresh_token: format!("refresh-{}", user.id),
            expires_at: Utc::now().timestamp() + 3600,
            user,
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Api("new row violates row-level security policy (403)".to_string()));
        }
        Ok(())
    }

    fn created_at(&self) -> DateTime<Utc> {
        let base = DateTime::from_timestamp(1_714_000_000, 0).unwrap_or_else(Utc::now);
        let offset = i64::try_from(self.next_id).unwrap_or(i64::MAX);
        base + Duration::seconds(offset)
    }
}

impl AuthBackend for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let mut state = self.lock()?;
        if state.accounts.contains_key(email) {
            return Err(AuthError::Api("User already registered (422)".to_string()).into());
        }
        let user = state.register(email, password);
        if state.require_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        state.current = Some(user.clone());
        Ok(SignUpOutcome::SignedIn(MemoryState::session_for(user)))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let mut state = self.lock()?;
        let user = state
            .accounts
            .get(email)
            .filter(|account| account.password == password)
            .map(|account| account.user.clone())
            .ok_or_else(|| AuthError::Api("Invalid login credentials (400)".to_string()))?;
        state.current = Some(user.clone());
        Ok(MemoryState::session_for(user))
    }

    async fn sign_out(&self) -> Result<()> {
        self.lock()?.current = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        Ok(self.lock()?.current.clone())
    }
}

impl NotesBackend for MemoryBackend {
    async fn fetch_notes(&self) -> Result<Vec<Note>> {
        let user = self.signed_in_user()?;
        let state = self.lock()?;
        let mut notes = state
            .notes
            .iter()
            .filter(|note| note.user_id == user.id)
            .cloned()
            .collect::<Vec<_>>();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn insert_note(&self, note: &NewNote) -> Result<()> {
        self.signed_in_user()?;
        let mut state = self.lock()?;
        state.check_writable()?;
        state.next_id += 1;
        let row = Note {
            id: NoteId::new(state.next_id.to_string()),
            content: note.content.clone(),
            user_id: note.user_id.clone(),
            category: note.category,
            created_at: state.created_at(),
            file_url: note.file_url.clone(),
        };
        state.notes.push(row);
        Ok(())
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<()> {
        self.signed_in_user()?;
        let mut state = self.lock()?;
        state.check_writable()?;
        // Like PostgREST, an update matching no row is not an error.
        if let Some(note) = state.notes.iter_mut().find(|note| &note.id == id) {
            note.apply_changes(changes);
        }
        Ok(())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.signed_in_user()?;
        let mut state = self.lock()?;
        state.check_writable()?;
        state.notes.retain(|note| &note.id != id);
        Ok(())
    }

    async fn upload_attachment(
        &self,
        file_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String> {
        self.signed_in_user()?;
        let mut state = self.lock()?;
        if state.fail_uploads {
            return Err(Error::Storage("The resource already exists (409)".to_string()));
        }
        state.uploads.push(file_name.to_string());
        Ok(format!("{PUBLIC_URL_PREFIX}{file_name}"))
    }
}
