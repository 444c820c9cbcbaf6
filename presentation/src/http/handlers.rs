//! Catalog and analytics route handlers.

use super::AppState;
use super::dto::{BatchCreated, BulkDeleteRequest, BulkUpdateRequest, QuestionQuery};
use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_application::{SubmitPayload, SubmitResult, UpdateBatch, ids_from_json};
use serde::Deserialize;
use serde_json::{Value, json};

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

// ==================== Catalog ====================

/// `POST /api/questions` - one question object or an array of them.
pub async fn submit_questions(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let payload = SubmitPayload::from_json(body)?;

    let response = match state.engine.submit(payload).await? {
        SubmitResult::Created(question) => (StatusCode::CREATED, Json(question)).into_response(),
        SubmitResult::Batch(outcome) => {
            (StatusCode::CREATED, Json(BatchCreated::from(outcome))).into_response()
        }
    };
    Ok(response)
}

/// `GET /api/questions?examType=&examYear=&subject=`
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let result = state.engine.query(&query.to_filter()).await?;
    Ok(Json(result).into_response())
}

/// `GET /api/questions/subjects-years`
pub async fn subjects_and_years(State(state): State<AppState>) -> Result<Response, ApiError> {
    let groups = state.engine.aggregate_catalog().await?;
    Ok(Json(groups).into_response())
}

/// `PATCH /api/questions/bulk` - body `{"updates": [...]}`.
pub async fn bulk_update(
    State(state): State<AppState>,
    body: Result<Json<BulkUpdateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let batch = UpdateBatch::from_json(request.updates)?;
    let outcome = state.engine.bulk_update(batch).await?;
    Ok(Json(outcome).into_response())
}

/// `DELETE /api/questions/bulk` (and `POST /api/questions/bulk-delete`) -
/// body `{"ids": [...]}`.
pub async fn bulk_delete(
    State(state): State<AppState>,
    body: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let ids = ids_from_json(request.ids)?;
    let outcome = state.engine.bulk_delete(ids).await?;
    Ok(Json(outcome).into_response())
}

// ==================== Analytics ====================

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    pub mode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExamQuery {
    pub exam: Option<String>,
}

/// `GET /api/analytics/total-users`
pub async fn total_users(State(state): State<AppState>) -> Result<Response, ApiError> {
    let total = state.analytics.total_users().await?;
    Ok(Json(json!({ "totalUsers": total })).into_response())
}

/// `GET /api/analytics/active-users`
pub async fn active_users(State(state): State<AppState>) -> Result<Response, ApiError> {
    let active = state.analytics.active_users().await?;
    Ok(Json(json!({ "activeUsers": active })).into_response())
}

/// `GET /api/analytics/total-practice-tests`
pub async fn total_practice_tests(State(state): State<AppState>) -> Result<Response, ApiError> {
    let total = state.analytics.total_practice_tests().await?;
    Ok(Json(json!({ "totalPracticeTests": total })).into_response())
}

/// `GET /api/analytics/practice-tests-by-mode?mode=`
pub async fn practice_tests_by_mode(
    State(state): State<AppState>,
    query: Result<Query<ModeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let total = state
        .analytics
        .practice_tests_by_mode(query.mode.as_deref())
        .await?;
    Ok(Json(json!({ "totalPracticeTests": total })).into_response())
}

/// `GET /api/analytics/practice-tests-by-exam?exam=`
pub async fn practice_tests_by_exam(
    State(state): State<AppState>,
    query: Result<Query<ExamQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let total = state
        .analytics
        .practice_tests_by_exam(query.exam.as_deref())
        .await?;
    Ok(Json(json!({ "total": total })).into_response())
}
