//! # Spendwise Backend
//!
//! Personal-finance backend: transactions, monthly category budgets,
//! month-scoped reports, budget alerts, user profiles, and a proxied
//! financial news feed.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, news client)
//!     ↓
//! Domain Layer (pure aggregation core + services)
//!     ↓
//! Storage Layer (SQLite persistence)
//! ```
//!
//! Every request carries the identity provider's uid; the IO layer turns it
//! into an explicit [`domain::Session`] that is passed through the whole
//! call chain. The domain core recomputes all derived data from a fresh
//! snapshot on every call.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::domain::{BudgetService, ReportService, SummaryService, TransactionService, UserService};
use crate::io::rest;
use crate::io::NewsClient;
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService,
    pub budget_service: BudgetService,
    pub report_service: ReportService,
    pub summary_service: SummaryService,
    pub user_service: UserService,
    pub news_client: NewsClient,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain services");
    Ok(AppState {
        transaction_service: TransactionService::new(db.clone()),
        budget_service: BudgetService::new(db.clone()),
        report_service: ReportService::new(db.clone()),
        summary_service: SummaryService::new(db.clone()),
        user_service: UserService::new(db),
        news_client: NewsClient::new(&config.news_base_url),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/transactions",
            get(rest::transaction_apis::list_transactions)
                .post(rest::transaction_apis::create_transaction),
        )
        .route(
            "/transactions/search",
            post(rest::transaction_apis::search_transactions),
        )
        .route(
            "/transactions/:id",
            put(rest::transaction_apis::update_transaction)
                .delete(rest::transaction_apis::delete_transaction),
        )
        .route(
            "/budgets",
            get(rest::budget_apis::list_budgets).post(rest::budget_apis::set_budget),
        )
        .route("/budgets/:id", delete(rest::budget_apis::delete_budget))
        .route("/reports", get(rest::report_apis::get_report))
        .route("/summary", get(rest::summary_apis::get_summary))
        .route(
            "/profile",
            get(rest::user_apis::get_profile)
                .post(rest::user_apis::register_user)
                .put(rest::user_apis::update_profile),
        )
        .route("/news", get(rest::news_apis::get_news));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
