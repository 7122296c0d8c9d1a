//! # REST API for the Financial Summary
//!
//! Endpoint for the home-screen summary: balance figures plus budget
//! alerts for the current month.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::session_from_headers;
use crate::AppState;

/// Compute the caller's financial summary and current alerts
pub async fn get_summary(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/summary");

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.summary_service.financial_summary(&session).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build summary: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building summary").into_response()
        }
    }
}
