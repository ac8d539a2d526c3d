//! HTTP client for the follow-up API.
//!
//! Calls are single shots: a failed request is reported to the caller and
//! never retried. After any mutation, callers reload both the collection and
//! the stats with [`FollowUpClient::reload`] instead of patching local state.

use crate::classify::Classifier;
use crate::models::{Dashboard, FollowUp, MessageResponse, NewFollowUp, Stats, Status};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub followups: Vec<FollowUp>,
    pub stats: Stats,
}

#[derive(Debug, Clone)]
pub struct FollowUpClient {
    http: Client,
    base_url: String,
}

impl FollowUpClient {
    /// `base_url` is the server root, for example `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn health_check(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("health check failed: {err}");
                false
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<FollowUp>, ClientError> {
        let response = self.http.get(self.url("/followups")).send().await?;
        decode(response).await
    }

    pub async fn stats(&self) -> Result<Stats, ClientError> {
        let response = self.http.get(self.url("/followups/stats")).send().await?;
        decode(response).await
    }

    pub async fn dashboard(&self) -> Result<Dashboard, ClientError> {
        let response = self.http.get(self.url("/dashboard")).send().await?;
        decode(response).await
    }

    pub async fn create(&self, input: &NewFollowUp) -> Result<FollowUp, ClientError> {
        let response = self
            .http
            .post(self.url("/followups"))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn set_status(&self, id: u64, status: Status) -> Result<FollowUp, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/followups/{id}")))
            .json(&json!({ "status": status }))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn complete(&self, id: u64) -> Result<FollowUp, ClientError> {
        self.set_status(id, Status::Completed).await
    }

    pub async fn delete(&self, id: u64) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/followups/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches the collection and the stats together.
    pub async fn reload(&self) -> Result<Snapshot, ClientError> {
        let (followups, stats) = tokio::try_join!(self.list(), self.stats())?;
        Ok(Snapshot { followups, stats })
    }
}

/// Client-side stats over an already fetched collection.
pub fn derive_stats(followups: &[FollowUp], classifier: &Classifier, now: DateTime<Utc>) -> Stats {
    classifier.aggregate(followups, now)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|body| body.error)
        .unwrap_or(body);

    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Server { status, message },
    })
}
