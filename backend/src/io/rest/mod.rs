//! # REST API Interface Layer
//!
//! HTTP endpoints for the spendwise backend. This layer handles:
//! - Request/response serialization and deserialization
//! - Session extraction from the identity header
//! - Error translation from domain results to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer: no business logic, no storage access.

pub mod budget_apis;
pub mod news_apis;
pub mod report_apis;
pub mod summary_apis;
pub mod transaction_apis;
pub mod user_apis;

use axum::http::{HeaderMap, StatusCode};

use crate::domain::Session;

/// Header carrying the authenticated uid issued by the identity provider.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Build the caller's session from the identity header. The uid is opaque;
/// the backend only requires it to be present and non-empty.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, (StatusCode, &'static str)> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Session::new(value).ok())
        .ok_or((StatusCode::UNAUTHORIZED, "Missing or invalid X-User-Id header"))
}
