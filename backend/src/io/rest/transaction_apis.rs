//! # REST API for Transactions
//!
//! Endpoints for listing, creating, searching, and deleting transactions.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::session_from_headers;
use crate::AppState;
use shared::{CreateTransactionRequest, TransactionFilter};

/// List the caller's transactions, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("GET /api/transactions");

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.transaction_service.list_transactions(&session).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing transactions").into_response()
        }
    }
}

/// Record a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.transaction_service.create_transaction(&session, request).await {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => {
            error!("Failed to create transaction: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Filter the caller's transactions; the matches come back grouped by date
pub async fn search_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(filter): Json<TransactionFilter>,
) -> impl IntoResponse {
    info!("POST /api/transactions/search - filter: {:?}", filter);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.transaction_service.search_transactions(&session, filter).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to search transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error searching transactions").into_response()
        }
    }
}

/// Replace the recorded fields of a single transaction
pub async fn update_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(transaction_id): Path<i64>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/transactions/{} - request: {:?}", transaction_id, request);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state
        .transaction_service
        .update_transaction(&session, transaction_id, request)
        .await
    {
        Ok(Some(transaction)) => (StatusCode::OK, Json(transaction)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Transaction not found").into_response(),
        Err(e) => {
            error!("Failed to update transaction {}: {}", transaction_id, e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Delete a single transaction by id
pub async fn delete_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(transaction_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", transaction_id);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.transaction_service.delete_transaction(&session, transaction_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Transaction not found").into_response(),
        Err(e) => {
            error!("Failed to delete transaction {}: {}", transaction_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting transaction").into_response()
        }
    }
}
