//! # REST API for Budgets
//!
//! Endpoints for setting, listing, and deleting monthly category budgets.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::rest::session_from_headers;
use crate::AppState;
use shared::SetBudgetRequest;

/// Query parameters for the budget listing API
#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// List budgets, either for one month or all of them
pub async fn list_budgets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BudgetListQuery>,
) -> impl IntoResponse {
    info!("GET /api/budgets - query: {:?}", query);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.budget_service.list_budgets(&session, query.month, query.year).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list budgets: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing budgets").into_response()
        }
    }
}

/// Create or replace a budget for a category and month
pub async fn set_budget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SetBudgetRequest>,
) -> impl IntoResponse {
    info!("POST /api/budgets - request: {:?}", request);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.budget_service.set_budget(&session, request).await {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(e) => {
            error!("Failed to set budget: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Delete a budget by id
pub async fn delete_budget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(budget_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/budgets/{}", budget_id);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.budget_service.delete_budget(&session, budget_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Budget not found").into_response(),
        Err(e) => {
            error!("Failed to delete budget {}: {}", budget_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting budget").into_response()
        }
    }
}
