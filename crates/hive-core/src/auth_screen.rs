//! Sign-in / sign-up form state.

use crate::auth::SignUpOutcome;
use crate::backend::AuthBackend;
use crate::error::{Error, Result};

pub const SIGN_IN_MISSING_MESSAGE: &str = "Emails and passwords please! 🍯";
pub const SIGN_UP_MISSING_MESSAGE: &str = "Fill in your details! 🐾";
pub const SIGN_UP_WELCOME_MESSAGE: &str = "Welcome! Try logging in now. ✨";

/// What the front-end should do after a successful form action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Signed in; go to the notes screen.
    Enter,
    /// Stay on the form and show this message.
    Notice(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    loading: bool,
}

impl AuthForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            loading: false,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn sign_in<B: AuthBackend>(&mut self, backend: &B) -> Result<AuthOutcome> {
        let (email, password) = self.begin(SIGN_IN_MISSING_MESSAGE)?;
        let result = backend.sign_in(&email, &password).await;
        self.loading = false;
        result?;
        Ok(AuthOutcome::Enter)
    }

    pub async fn sign_up<B: AuthBackend>(&mut self, backend: &B) -> Result<AuthOutcome> {
        let (email, password) = self.begin(SIGN_UP_MISSING_MESSAGE)?;
        let result = backend.sign_up(&email, &password).await;
        self.loading = false;
        Ok(Self::sign_up_outcome(result?))
    }

    /// Validate the fields and mark the form loading.
    ///
    /// Returns the credentials to send. Split out so a UI can release its
    /// borrow of the form before awaiting the backend.
    pub fn begin(&mut self, missing_message: &str) -> Result<(String, String)> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(Error::Validation(missing_message.to_string()));
        }
        self.loading = true;
        Ok((self.email.clone(), self.password.clone()))
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    #[must_use]
    pub fn sign_up_outcome(outcome: SignUpOutcome) -> AuthOutcome {
        match outcome {
            SignUpOutcome::SignedIn(_) => AuthOutcome::Enter,
            SignUpOutcome::ConfirmationRequired => {
                AuthOutcome::Notice(SIGN_UP_WELCOME_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn form(email: &str, password: &str) -> AuthForm {
        AuthForm::with_credentials(email, password)
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_network() {
        let backend = MemoryBackend::new();

        let error = form("", "honey").sign_in(&backend).await.unwrap_err();
        assert_eq!(error.to_string(), SIGN_IN_MISSING_MESSAGE);

        let error = form("bee@hive.test", "").sign_up(&backend).await.unwrap_err();
        assert_eq!(error.to_string(), SIGN_UP_MISSING_MESSAGE);
        assert_eq!(backend.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_up_with_session_enters_notes() {
        let backend = MemoryBackend::new();
        let mut form = form("bee@hive.test", "honey");
        assert_eq!(form.sign_up(&backend).await.unwrap(), AuthOutcome::Enter);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn sign_up_pending_confirmation_shows_welcome() {
        let backend = MemoryBackend::new();
        backend.set_require_confirmation(true);
        let outcome = form("bee@hive.test", "honey").sign_up(&backend).await.unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Notice(SIGN_UP_WELCOME_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn sign_in_surfaces_backend_message() {
        let backend = MemoryBackend::new();
        let mut form = form("bee@hive.test", "wrong");
        let error = form.sign_in(&backend).await.unwrap_err();
        assert!(error.to_string().contains("Invalid login credentials"));
        assert!(!form.is_loading());
    }
}
