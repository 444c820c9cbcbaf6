//! Request and response bodies.

use catalog_domain::{BulkInsertOutcome, CatalogFilter, Question};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string of `GET /api/questions`. Unknown parameters are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionQuery {
    pub exam_type: Option<String>,
    pub exam_year: Option<String>,
    pub subject: Option<String>,
}

impl QuestionQuery {
    pub fn to_filter(&self) -> CatalogFilter {
        CatalogFilter::from_params(
            self.exam_type.as_deref(),
            self.exam_year.as_deref(),
            self.subject.as_deref(),
        )
    }
}

/// Body of `PATCH /api/questions/bulk`.
///
/// `updates` is kept loose so a malformed item is reported on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkUpdateRequest {
    #[serde(default)]
    pub updates: Value,
}

/// Body of `DELETE /api/questions/bulk`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Value,
}

/// Body of a bulk `POST /api/questions` response.
///
/// A fully successful batch is rendered as the plain array of created
/// records; otherwise as `{created, failed}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchCreated {
    All(Vec<Question>),
    Partial(BulkInsertOutcome),
}

impl From<BulkInsertOutcome> for BatchCreated {
    fn from(outcome: BulkInsertOutcome) -> Self {
        if outcome.is_complete() {
            BatchCreated::All(outcome.created)
        } else {
            BatchCreated::Partial(outcome)
        }
    }
}
