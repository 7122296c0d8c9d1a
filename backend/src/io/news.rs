//! Client for the remote financial news feed.
//!
//! The feed is a plain HTTP GET returning a JSON page of articles. It is
//! opaque display data: nothing in the domain layer depends on it, so
//! failures here never affect the rest of the backend.

use shared::NewsResponse;
use thiserror::Error;

/// Articles fetched per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Error)]
pub enum NewsError {
    /// The request could not be sent or the body could not be decoded.
    #[error("news feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The feed answered with a non-success status.
    #[error("news feed returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one page of the sports-desk financial news feed.
    pub async fn fetch_news(&self, limit: u32, offset: u32) -> Result<NewsResponse, NewsError> {
        let url = format!("{}/news/sport", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NewsError::Status(response.status()));
        }

        Ok(response.json::<NewsResponse>().await?)
    }
}
