use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("failed to fetch movie details: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to fetch movie details: upstream returned {0}")]
    Status(StatusCode),
}

/// Client for the third-party movie metadata API. One request per call,
/// no retry or backoff; any failure is fatal for the caller.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_movie_details(&self, movie_id: i32) -> Result<Value, TmdbError> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), movie_id);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, movie_id, "movie metadata request rejected");
            return Err(TmdbError::Status(status));
        }

        Ok(response.json().await?)
    }
}
