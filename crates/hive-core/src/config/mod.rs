//! Client configuration.
//!
//! The Supabase endpoint and public anon key are compiled in. Both are
//! safe-to-ship public values; row-level security on the backend is what
//! keeps each user's notes private. Development builds can point elsewhere
//! through environment variables.

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_SUPABASE_URL: &str = "https://vrpdbtpgbntfydlbltlh.supabase.co";
pub const DEFAULT_SUPABASE_ANON_KEY: &str = "sb_publishable_VE04weW4FboClYjKun_ZHg_EPs53Fws";
pub const NOTES_TABLE: &str = "notes";
pub const ATTACHMENTS_BUCKET: &str = "note-attachments";

pub const SUPABASE_URL_ENV: &str = "HIVE_SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "HIVE_SUPABASE_ANON_KEY";

/// Endpoints and names the client talks to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub notes_table: String,
    pub attachments_bucket: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            supabase_url: DEFAULT_SUPABASE_URL.to_string(),
            supabase_anon_key: DEFAULT_SUPABASE_ANON_KEY.to_string(),
            notes_table: NOTES_TABLE.to_string(),
            attachments_bucket: ATTACHMENTS_BUCKET.to_string(),
        }
    }
}

impl ClientConfig {
    /// Compiled-in values with `HIVE_SUPABASE_URL` / `HIVE_SUPABASE_ANON_KEY`
    /// overrides applied.
    pub fn from_env() -> Result<Self, String> {
        Self::default().with_overrides(
            std::env::var(SUPABASE_URL_ENV).ok(),
            std::env::var(SUPABASE_ANON_KEY_ENV).ok(),
        )
    }

    /// Apply optional overrides; blank values keep the current setting.
    pub fn with_overrides(
        mut self,
        supabase_url: Option<String>,
        supabase_anon_key: Option<String>,
    ) -> Result<Self, String> {
        if let Some(url) = normalize_text_option(supabase_url) {
            if !is_http_url(&url) {
                return Err(format!(
                    "{SUPABASE_URL_ENV} must include http:// or https://"
                ));
            }
            self.supabase_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = normalize_text_option(supabase_anon_key) {
            self.supabase_anon_key = key;
        }
        Ok(self)
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.supabase_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_compiled_in_project() {
        let config = ClientConfig::default();
        assert_eq!(config.supabase_url, DEFAULT_SUPABASE_URL);
        assert_eq!(config.notes_table, "notes");
        assert_eq!(config.attachments_bucket, "note-attachments");
    }

    #[test]
    fn overrides_are_trimmed_and_validated() {
        let config = ClientConfig::default()
            .with_overrides(
                Some(" http://localhost:54321/ ".to_string()),
                Some(" local-anon ".to_string()),
            )
            .unwrap();
        assert_eq!(config.supabase_url, "http://localhost:54321");
        assert_eq!(config.supabase_anon_key, "local-anon");

        let error = ClientConfig::default()
            .with_overrides(Some("localhost:54321".to_string()), None)
            .unwrap_err();
        assert!(error.contains("http://"));
    }

    #[test]
    fn blank_overrides_keep_defaults() {
        let config = ClientConfig::default()
            .with_overrides(Some("   ".to_string()), None)
            .unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
