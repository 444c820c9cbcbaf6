//! HTTP API - maps routes onto the catalog engine and usage analytics.
//!
//! ## Routes
//!
//! - `POST /api/questions` - submit one question or an array
//! - `GET /api/questions` - filtered read, `{count, data}`
//! - `GET /api/questions/subjects-years` - `[{subject, examType, years}]`
//! - `PATCH /api/questions/bulk` - `{updates: [...]}`
//! - `DELETE /api/questions/bulk`, `POST /api/questions/bulk-delete` - `{ids: [...]}`
//! - `GET /api/analytics/*` - usage counters
//! - `GET /health` - `{ "ok": true }`
//!
//! Failures are rendered as `{ "error": "<message>" }` with 400 for invalid
//! requests and 500 for store failures.

pub mod dto;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::{get, patch, post};
use catalog_application::{CatalogEngine, UsageAnalytics};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared handler state: `Arc` handles to the use cases only.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CatalogEngine>,
    pub analytics: Arc<UsageAnalytics>,
}

impl AppState {
    pub fn new(engine: Arc<CatalogEngine>, analytics: Arc<UsageAnalytics>) -> Self {
        Self { engine, analytics }
    }
}

/// Build the axum `Router` for the whole API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/questions",
            post(handlers::submit_questions).get(handlers::list_questions),
        )
        .route(
            "/api/questions/subjects-years",
            get(handlers::subjects_and_years),
        )
        .route(
            "/api/questions/bulk",
            patch(handlers::bulk_update).delete(handlers::bulk_delete),
        )
        .route("/api/questions/bulk-delete", post(handlers::bulk_delete))
        .route("/api/analytics/total-users", get(handlers::total_users))
        .route("/api/analytics/active-users", get(handlers::active_users))
        .route(
            "/api/analytics/total-practice-tests",
            get(handlers::total_practice_tests),
        )
        .route(
            "/api/analytics/practice-tests-by-mode",
            get(handlers::practice_tests_by_mode),
        )
        .route(
            "/api/analytics/practice-tests-by-exam",
            get(handlers::practice_tests_by_exam),
        )
        .with_state(state)
}

/// Serve the API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
