//! Supabase auth client and session persistence.

use std::fmt;
use std::sync::{Arc, Mutex};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{is_http_url, parse_api_error, unix_timestamp_now};

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Sign-up either signs the user in right away or waits for email
/// confirmation, depending on the project's auth settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    ConfirmationRequired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Where the signed-in session lives between runs.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Process-local session store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<AuthSession>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, Option<AuthSession>>> {
        self.slot
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        Ok(self.lock()?.clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Token endpoint grants used by the client.
#[derive(Debug, Clone, Copy)]
enum Grant {
    Password,
    RefreshToken,
}

impl Grant {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::RefreshToken => "refresh_token",
        }
    }
}

#[derive(Clone)]
pub struct SupabaseAuthClient<S: SessionPersistence> {
    auth_url: String,
    anon_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> SupabaseAuthClient<S> {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>, store: S) -> AuthResult<Self> {
        Self::with_client(url, anon_key, store, Client::builder().build()?)
    }

    /// Build on top of an existing HTTP client so connections are shared.
    pub fn with_client(
        url: impl AsRef<str>,
        anon_key: impl Into<String>,
        store: S,
        client: Client,
    ) -> AuthResult<Self> {
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            auth_url: normalize_auth_url(url.as_ref())?,
            anon_key,
            client,
            store,
        })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the persisted session, refreshing it when it has expired.
    ///
    /// A session that cannot be refreshed is cleared and reported as signed out.
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let stored = match self.store.load_session()? {
            Some(session) if session.is_expired() => session,
            other => return Ok(other),
        };

        let refreshed = self.refresh_session(&stored.refresh_token).await;
        if let Err(error) = &refreshed {
            tracing::warn!("Stored session could not be refreshed: {}", error);
            self.store.clear_session()?;
        }
        Ok(refreshed.ok())
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        let body = serde_json::json!({ "email": email, "password": password });
        let request = self.endpoint("signup").json(&body);
        match self.exchange(request).await? {
            Some(session) => {
                self.store.save_session(&session)?;
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.grant(Grant::Password, &body).await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty",
            ));
        }
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.grant(Grant::RefreshToken, &body).await
    }

    /// Ask the auth server who owns `access_token`.
    ///
    /// Returns `None` when the token is no longer accepted.
    pub async fn fetch_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>> {
        let response = self
            .client
            .get(format!("{}/user", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let user = ensure_success(response).await?.json::<GotrueUser>().await?;
        Ok(Some(user.into()))
    }

    /// Revoke the session remotely and forget it locally.
    ///
    /// A token the server already rejects still counts as signed out.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            ensure_success(response).await?;
        }
        self.store.clear_session()?;
        Ok(())
    }

    /// POST to `path` authorised with the anon key.
    fn endpoint(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}/{path}", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn grant(&self, grant: Grant, body: &serde_json::Value) -> AuthResult<AuthSession> {
        let request = self
            .endpoint("token")
            .query(&[("grant_type", grant.as_str())])
            .json(body);
        let session = self.exchange(request).await?.ok_or_else(|| {
            AuthError::Api(format!(
                "The {} grant did not return an active session",
                grant.as_str()
            ))
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    async fn exchange(&self, request: RequestBuilder) -> AuthResult<Option<AuthSession>> {
        let response = ensure_success(request.send().await?).await?;
        response.json::<GotrueResponse>().await?.into_session()
    }
}

async fn ensure_success(response: Response) -> AuthResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Api(parse_api_error(status, &body)))
}

/// Point a project URL at its `/auth/v1` root.
pub fn normalize_auth_url(url: &str) -> AuthResult<String> {
    let base = url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(base) {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if base.ends_with("/auth/v1") {
        Ok(base.to_string())
    } else {
        Ok(format!("{base}/auth/v1"))
    }
}

/// Session fields GoTrue may return either at the top level or under `session`.
#[derive(Debug, Default, Deserialize)]
struct SessionFields {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<GotrueUser>,
}

impl SessionFields {
    fn or(self, fallback: Self) -> Self {
        Self {
            access_token: self.access_token.or(fallback.access_token),
            refresh_token: self.refresh_token.or(fallback.refresh_token),
            expires_at: self.expires_at.or(fallback.expires_at),
            expires_in: self.expires_in.or(fallback.expires_in),
            user: self.user.or(fallback.user),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GotrueResponse {
    #[serde(flatten)]
    fields: SessionFields,
    #[serde(default)]
    session: Option<SessionFields>,
    // Sign-up without auto-confirm answers with the bare user object.
    id: Option<String>,
    email: Option<String>,
}

impl GotrueResponse {
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let bare_user = self.id.map(|id| GotrueUser {
            id,
            email: self.email,
        });
        let fields = self.fields.or(self.session.unwrap_or_default());
        let expires_at = fields.expires_at.or_else(|| {
            fields
                .expires_in
                .map(|seconds| unix_timestamp_now().saturating_add(seconds))
        });
        let user = fields.user.or(bare_user).map(AuthUser::from);

        match (fields.access_token, fields.refresh_token, expires_at, user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user,
                }))
            }
            (None, None, None, Some(_)) => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GotrueUser {
    id: String,
    email: Option<String>,
}

impl From<GotrueUser> for AuthUser {
    fn from(user: GotrueUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> AuthResult<Option<AuthSession>> {
        serde_json::from_str::<GotrueResponse>(payload)
            .unwrap()
            .into_session()
    }

    #[test]
    fn normalize_auth_url_appends_auth_path() {
        let normalized = normalize_auth_url("https://demo.supabase.co/").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn normalize_auth_url_keeps_existing_auth_path() {
        let normalized = normalize_auth_url("https://demo.supabase.co/auth/v1").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn normalize_auth_url_rejects_missing_scheme() {
        assert!(normalize_auth_url("demo.supabase.co").is_err());
        assert!(normalize_auth_url("  ").is_err());
    }

    #[test]
    fn token_response_becomes_session() {
        let session = parse(
            r#"{
                "access_token": "a",
                "refresh_token": "r",
                "expires_at": 1700000000,
                "user": {"id": "user-1", "email": "bear@example.com"}
            }"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(session.user.id, "user-1");
        assert_eq!(session.expires_at, 1_700_000_000);
    }

    #[test]
    fn expires_in_is_converted_to_absolute_time() {
        let session = parse(
            r#"{"access_token": "a", "refresh_token": "r", "expires_in": 3600,
                "user": {"id": "u", "email": null}}"#,
        )
        .unwrap()
        .unwrap();
        assert!(session.expires_at > unix_timestamp_now());
        assert!(!session.is_expired());
    }

    #[test]
    fn bare_user_signup_response_means_confirmation_required() {
        let outcome = parse(r#"{"id": "user-1", "email": "bear@example.com"}"#).unwrap();
        assert!(outcome.is_none());

        let outcome = parse(r#"{"user": {"id": "user-1", "email": null}, "session": null}"#)
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn partial_session_is_an_error() {
        let result = parse(r#"{"access_token": "a", "user": {"id": "u", "email": null}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn memory_store_shares_slot_between_clones() {
        let store = MemorySessionStore::new();
        let clone = store.clone();
        let session = AuthSession {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 0,
            user: AuthUser {
                id: "u".to_string(),
                email: None,
            },
        };
        store.save_session(&session).unwrap();
        assert_eq!(clone.load_session().unwrap(), Some(session));
        clone.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
            },
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
