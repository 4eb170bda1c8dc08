//! PostgREST client for the notes table.
//!
//! Row-level security decides which rows a token may see, so every request
//! carries the signed-in user's access token.

use reqwest::{Client, RequestBuilder, Response};

use crate::error::{Error, Result};
use crate::models::{NewNote, Note, NoteChanges, NoteId};
use crate::util::{is_http_url, parse_api_error};

#[derive(Debug, Clone)]
pub struct SupabaseRestClient {
    table_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseRestClient {
    pub fn new(
        url: impl AsRef<str>,
        anon_key: impl Into<String>,
        table: &str,
        client: Client,
    ) -> Result<Self> {
        let base = url.as_ref().trim().trim_end_matches('/');
        if !is_http_url(base) {
            return Err(Error::Validation(
                "Supabase URL must include http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            table_url: format!("{base}/rest/v1/{}", table.trim()),
            anon_key: anon_key.into(),
            client,
        })
    }

    /// Every note visible to the token, newest first.
    pub async fn list_notes(&self, access_token: &str) -> Result<Vec<Note>> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = send(self.authorized(request, access_token)).await?;
        Ok(response.json::<Vec<Note>>().await?)
    }

    pub async fn insert_note(&self, access_token: &str, note: &NewNote) -> Result<()> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(note);
        send(self.authorized(request, access_token)).await?;
        Ok(())
    }

    pub async fn update_note(
        &self,
        access_token: &str,
        id: &NoteId,
        changes: &NoteChanges,
    ) -> Result<()> {
        let request = self
            .client
            .patch(&self.table_url)
            .query(&[("id", id_filter(id))])
            .header("Prefer", "return=minimal")
            .json(changes);
        send(self.authorized(request, access_token)).await?;
        Ok(())
    }

    pub async fn delete_note(&self, access_token: &str, id: &NoteId) -> Result<()> {
        let request = self
            .client
            .delete(&self.table_url)
            .query(&[("id", id_filter(id))]);
        send(self.authorized(request, access_token)).await?;
        Ok(())
    }

    fn authorized(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }
}

fn id_filter(id: &NoteId) -> String {
    format!("eq.{id}")
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api(parse_api_error(status, &body)));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_is_built_from_base() {
        let client =
            SupabaseRestClient::new("https://example.supabase.co/", "anon", "notes", Client::new())
                .unwrap();
        assert_eq!(client.table_url, "https://example.supabase.co/rest/v1/notes");
    }

    #[test]
    fn id_filter_uses_equality_operator() {
        assert_eq!(id_filter(&NoteId::new("42")), "eq.42");
    }

    #[test]
    fn note_rows_deserialize_leniently() {
        let payload = r#"[
            {"id": 7, "content": "Hello", "user_id": "u1", "category": "idea",
             "created_at": "2024-05-01T10:00:00+00:00", "file_url": null, "title": "Note"},
            {"id": "8", "user_id": "u1", "category": "mystery",
             "created_at": "2024-05-01T09:00:00.123456+00:00"}
        ]"#;
        let notes: Vec<Note> = serde_json::from_str(payload).unwrap();
        assert_eq!(notes[0].id, NoteId::new("7"));
        assert_eq!(notes[0].category, crate::models::Category::Idea);
        assert_eq!(notes[1].category, crate::models::Category::General);
        assert_eq!(notes[1].content, "");
        assert_eq!(notes[1].file_url, None);
    }
}
