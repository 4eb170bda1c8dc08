//! Supabase storage client for note attachments.

use reqwest::Client;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::{is_http_url, parse_api_error};

/// Uploads files into one public bucket and resolves their public URLs.
#[derive(Debug, Clone)]
pub struct SupabaseStorageClient {
    storage_url: String,
    bucket: String,
    anon_key: String,
    client: Client,
}

impl SupabaseStorageClient {
    pub fn new(
        url: impl AsRef<str>,
        anon_key: impl Into<String>,
        bucket: impl Into<String>,
        client: Client,
    ) -> Result<Self> {
        let base = url.as_ref().trim().trim_end_matches('/');
        if !is_http_url(base) {
            return Err(Error::Storage(
                "Supabase URL must include http:// or https://".to_string(),
            ));
        }
        let bucket = bucket.into().trim().trim_matches('/').to_string();
        if bucket.is_empty() {
            return Err(Error::Storage("Bucket name must not be empty".to_string()));
        }

        Ok(Self {
            storage_url: format!("{base}/storage/v1"),
            bucket,
            anon_key: anon_key.into(),
            client,
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload `bytes` as `file_name`. Existing objects are never overwritten.
    pub async fn upload(
        &self,
        access_token: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let url = format!(
            "{}/object/{}/{}",
            self.storage_url,
            self.bucket,
            urlencoding::encode(file_name)
        );
        tracing::debug!("Uploading {} bytes to {}", bytes.len(), url);

        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Storage(parse_api_error(status, &body)));
        }
        Ok(())
    }

    /// Public URL of an object in the bucket. No request is made.
    #[must_use]
    pub fn public_url(&self, file_name: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url,
            self.bucket,
            urlencoding::encode(file_name)
        )
    }
}

/// Random object name keeping the original file's extension.
#[must_use]
pub fn attachment_file_name(original: &str) -> String {
    let id = Uuid::new_v4();
    match file_extension(original) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

fn file_extension(file_name: &str) -> Option<String> {
    let base = file_name
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseStorageClient {
        SupabaseStorageClient::new(
            "https://example.supabase.co/",
            "anon",
            "note-attachments",
            Client::new(),
        )
        .unwrap()
    }

    #[test]
    fn public_url_points_at_public_object_path() {
        assert_eq!(
            client().public_url("abc.png"),
            "https://example.supabase.co/storage/v1/object/public/note-attachments/abc.png"
        );
    }

    #[test]
    fn rejects_url_without_scheme() {
        let error = SupabaseStorageClient::new("example.co", "anon", "b", Client::new())
            .unwrap_err()
            .to_string();
        assert!(error.contains("http://"));
    }

    #[test]
    fn attachment_name_keeps_extension() {
        let name = attachment_file_name("Holiday Photo.JPG");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "jpg");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn attachment_name_without_extension_is_bare_uuid() {
        for original in ["README", ".bashrc", "notes.", "dir.d/file"] {
            let name = attachment_file_name(original);
            assert!(Uuid::parse_str(&name).is_ok(), "{original} -> {name}");
        }
    }

    #[test]
    fn attachment_names_are_unique() {
        assert_ne!(attachment_file_name("a.pdf"), attachment_file_name("a.pdf"));
    }
}
