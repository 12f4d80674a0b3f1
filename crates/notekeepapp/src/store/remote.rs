//! Network-backed store: a document collection reached over HTTP.
//!
//! Speaks the notekeep wire contract against a running server. Every
//! request carries a bounded timeout; there are no retries, failures
//! propagate to the caller. HTTP statuses map onto the error taxonomy:
//! 404 is `NotFound`, 400 is `Validation`, anything else non-2xx is a
//! store failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use super::NoteStore;
use crate::config::RemoteConfig;
use crate::error::{NoteError, Result};
use crate::model::{NewNote, Note, NotePatch};

pub struct RemoteStore {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a non-2xx response onto the error taxonomy. `id` is the record
    /// the request addressed, used to shape 404s.
    async fn check(resp: reqwest::Response, id: Option<Uuid>) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(match (status.as_u16(), id) {
            (404, Some(id)) => NoteError::NotFound(id),
            (400, _) => NoteError::Validation(message),
            _ => NoteError::Store(message),
        })
    }
}

#[async_trait]
impl NoteStore for RemoteStore {
    async fn list(&self) -> Result<Vec<Note>> {
        let resp = self.client.get(self.url("notes/all")).send().await?;
        Ok(Self::check(resp, None).await?.json().await?)
    }

    async fn insert(&self, new: NewNote) -> Result<Note> {
        let resp = self.client.post(self.url("notes")).json(&new).send().await?;
        Ok(Self::check(resp, None).await?.json().await?)
    }

    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note> {
        let resp = self
            .client
            .put(self.url(&format!("notes/{}", id)))
            .json(&patch)
            .send()
            .await?;
        Ok(Self::check(resp, Some(id)).await?.json().await?)
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("notes/{}?permanent=true", id)))
            .send()
            .await?;
        // A 404 here means the record is already gone; removal is idempotent.
        match Self::check(resp, Some(id)).await {
            Ok(_) | Err(NoteError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
