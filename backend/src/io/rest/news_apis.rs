//! # REST API for the News Feed
//!
//! Proxies the remote financial news feed for the news screen. The feed is
//! opaque display data; the backend only forwards pages.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::news::DEFAULT_PAGE_SIZE;
use crate::AppState;

/// Query parameters for the news API
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Fetch one page of the news feed
pub async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> impl IntoResponse {
    info!("GET /api/news - query: {:?}", query);

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);

    match state.news_client.fetch_news(limit, offset).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to fetch news: {}", e);
            (StatusCode::BAD_GATEWAY, "Error fetching news").into_response()
        }
    }
}
