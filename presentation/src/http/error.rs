//! Error-to-response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_application::{CatalogError, Fault, UsageStatsError};
use serde_json::json;
use tracing::error;

/// Every failure a handler can return. Rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Usage(UsageStatsError),
    /// The request body or query string could not be decoded.
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Catalog(e) => match e.fault() {
                Fault::Client => StatusCode::BAD_REQUEST,
                Fault::Server => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Usage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Catalog(e) => e.to_string(),
            ApiError::Usage(e) => e.to_string(),
            ApiError::BadRequest(message) => message.clone(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl From<UsageStatsError> for ApiError {
    fn from(e: UsageStatsError) -> Self {
        ApiError::Usage(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!("Request failed: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
