//! Catalog engine use case
//!
//! The facade over the filter builder, the bulk mutation coordinator and the
//! aggregation pipeline. It defines the externally visible catalog
//! operations and holds no state beyond its port handles.

use super::bulk_mutation::BulkMutationCoordinator;
use super::payload::{SubmitPayload, UpdateBatch};
use crate::config::EngineParams;
use crate::ports::audit_logger::AuditLogger;
use crate::ports::document_store::{DocumentStore, StoreError};
use catalog_domain::{
    AggregateGroup, BulkDeleteOutcome, BulkInsertOutcome, BulkUpdateOutcome, CatalogFilter,
    DomainError, Question, QuestionId, build_predicate, sort_groups,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by catalog operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Who is at fault for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The request was malformed; retrying it unchanged will fail again.
    Client,
    /// The store failed.
    Server,
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn fault(&self) -> Fault {
        match self {
            CatalogError::Validation(_) => Fault::Client,
            CatalogError::Store(_) => Fault::Server,
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(e: DomainError) -> Self {
        CatalogError::Validation(e.to_string())
    }
}

/// What `submit` created.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    Created(Question),
    Batch(BulkInsertOutcome),
}

/// Result of a filtered read. `count` is always `data.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub count: usize,
    pub data: Vec<Question>,
}

impl From<Vec<Question>> for QueryResult {
    fn from(data: Vec<Question>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Catalog engine facade
pub struct CatalogEngine {
    store: Arc<dyn DocumentStore>,
    coordinator: BulkMutationCoordinator,
}

impl CatalogEngine {
    pub fn new(store: Arc<dyn DocumentStore>, params: EngineParams) -> Self {
        Self {
            coordinator: BulkMutationCoordinator::new(Arc::clone(&store), params),
            store,
        }
    }

    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.coordinator = self.coordinator.with_audit_logger(logger);
        self
    }

    pub fn params(&self) -> &EngineParams {
        self.coordinator.params()
    }

    /// Insert one question or a batch.
    pub async fn submit(&self, payload: SubmitPayload) -> Result<SubmitResult, CatalogError> {
        match payload {
            SubmitPayload::Single(draft) => {
                self.coordinator.insert_one(&draft).await.map(SubmitResult::Created)
            }
            SubmitPayload::Batch(items) => {
                self.coordinator.insert_many(items).await.map(SubmitResult::Batch)
            }
        }
    }

    /// All questions matching the filter. Unpaginated.
    pub async fn query(&self, filter: &CatalogFilter) -> Result<QueryResult, CatalogError> {
        let predicate = build_predicate(filter);
        debug!("Querying with {} condition(s)", predicate.conditions().len());

        let questions = self.store.find(&predicate).await?;
        Ok(QueryResult::from(questions))
    }

    /// Distinct years per `(subject, examType)`, sorted by subject.
    pub async fn aggregate_catalog(&self) -> Result<Vec<AggregateGroup>, CatalogError> {
        let mut groups = self.store.aggregate_groups().await?;
        sort_groups(&mut groups);
        info!("Aggregated catalog into {} groups", groups.len());
        Ok(groups)
    }

    pub async fn bulk_update(&self, batch: UpdateBatch) -> Result<BulkUpdateOutcome, CatalogError> {
        self.coordinator.update_many(batch.into_items()).await
    }

    pub async fn bulk_delete(&self, ids: Vec<QuestionId>) -> Result<BulkDeleteOutcome, CatalogError> {
        self.coordinator.delete_many(ids).await
    }
}
