//! # REST API for Reports
//!
//! Endpoint for the month-scoped spending report.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::rest::session_from_headers;
use crate::AppState;

/// Query parameters for the report API; both default to the current date
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Build the spending report for one calendar month
pub async fn get_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports - query: {:?}", query);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.report_service.monthly_report(&session, query.month, query.year).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Failed to build report: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::USER_ID_HEADER;
    use crate::testing::setup_test_state;
    use axum::http::HeaderValue;

    fn auth_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("test-user"));
        headers
    }

    #[tokio::test]
    async fn test_get_report_handler() {
        let state = setup_test_state().await;

        let query = ReportQuery {
            month: Some(6),
            year: Some(2025),
        };
        let response = get_report(State(state), auth_headers(), Query(query)).await;

        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_report_invalid_month() {
        let state = setup_test_state().await;

        let query = ReportQuery {
            month: Some(13),
            year: Some(2025),
        };
        let response = get_report(State(state), auth_headers(), Query(query)).await;

        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_report_requires_session() {
        let state = setup_test_state().await;

        let query = ReportQuery {
            month: None,
            year: None,
        };
        let response = get_report(State(state), HeaderMap::new(), Query(query)).await;

        assert_eq!(response.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
