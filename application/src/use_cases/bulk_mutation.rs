//! Bulk mutation coordinator
//!
//! Executes batched inserts, per-record updates and multi-id deletes against
//! the document store, collecting per-item outcomes instead of aborting on
//! the first failure.

use super::catalog_engine::CatalogError;
use crate::config::EngineParams;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::document_store::DocumentStore;
use catalog_domain::{
    BulkDeleteOutcome, BulkInsertOutcome, BulkUpdateOutcome, DomainError, ItemFailure,
    ItemOutcome, NewQuestion, PatchError, Question, QuestionDraft, QuestionId, QuestionPatch,
    partition_outcomes,
};
use futures::stream::{self, StreamExt};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Coordinates multi-item writes against a [`DocumentStore`].
///
/// Structural validation happens before any store call. A bulk insert is a
/// single batch write; bulk updates are dispatched with at most
/// `max_in_flight` in flight. Results are always reported in input order.
pub struct BulkMutationCoordinator {
    store: Arc<dyn DocumentStore>,
    params: EngineParams,
    audit_logger: Arc<dyn AuditLogger>,
}

impl BulkMutationCoordinator {
    pub fn new(store: Arc<dyn DocumentStore>, params: EngineParams) -> Self {
        Self {
            store,
            params,
            audit_logger: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = logger;
        self
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    fn concurrency(&self) -> usize {
        self.params.max_in_flight.max(1)
    }

    /// Validate and insert a single question.
    pub async fn insert_one(&self, draft: &QuestionDraft) -> Result<Question, CatalogError> {
        let new = draft.validate(self.params.submit_policy)?;
        let question = self.store.insert_one(new).await?;

        info!("Created question {}", question.id);
        self.audit_logger.log(AuditEvent::new(
            "question_created",
            json!({
                "id": question.id,
                "subject": question.subject,
                "examType": question.exam_type,
                "examYear": question.exam_year,
            }),
        ));

        Ok(question)
    }

    /// Insert a batch with partial-insertion semantics.
    ///
    /// Items that fail decoding or validation are reported with their index
    /// and the rest are inserted. If every item that reached the store failed
    /// there, the first store error is returned instead.
    pub async fn insert_many(
        &self,
        items: Vec<Result<QuestionDraft, DomainError>>,
    ) -> Result<BulkInsertOutcome, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::validation("questions array cannot be empty"));
        }

        let total = items.len();
        let policy = self.params.submit_policy;
        let mut outcomes: Vec<(usize, ItemOutcome<Question>)> = Vec::with_capacity(total);
        let mut valid = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            match item.and_then(|draft| draft.validate(policy)) {
                Ok(new) => valid.push((index, new)),
                Err(e) => {
                    debug!("Rejected question at index {}: {}", index, e);
                    outcomes.push((index, ItemOutcome::Failed(ItemFailure::new(index, e.to_string()))));
                }
            }
        }

        if valid.is_empty() {
            let reason = outcomes
                .first()
                .and_then(|(_, outcome)| match outcome {
                    ItemOutcome::Failed(failure) => Some(failure.reason.clone()),
                    ItemOutcome::Succeeded(_) => None,
                })
                .unwrap_or_default();
            return Err(CatalogError::validation(format!(
                "no valid questions in batch (item 0: {})",
                reason
            )));
        }

        let submitted = valid.len();
        info!("Inserting {} of {} questions", submitted, total);

        let (indices, questions): (Vec<usize>, Vec<NewQuestion>) = valid.into_iter().unzip();
        let results = self.store.insert_many(questions).await;

        let mut first_store_error = None;
        let mut store_failures = 0;
        for (index, result) in indices.into_iter().zip(results) {
            match result {
                Ok(question) => outcomes.push((index, ItemOutcome::Succeeded(question))),
                Err(e) => {
                    warn!("Insert of question at index {} failed: {}", index, e);
                    store_failures += 1;
                    outcomes.push((index, ItemOutcome::Failed(ItemFailure::new(index, e.to_string()))));
                    first_store_error.get_or_insert(e);
                }
            }
        }

        if store_failures == submitted
            && let Some(err) = first_store_error
        {
            return Err(err.into());
        }

        outcomes.sort_by_key(|(index, _)| *index);
        let (created, failed) =
            partition_outcomes(outcomes.into_iter().map(|(_, outcome)| outcome).collect());
        let outcome = BulkInsertOutcome { created, failed };

        if let Some(partial) = outcome.partial_failure() {
            warn!("Bulk insert finished with failures: {}", partial);
        }
        self.audit_logger.log(AuditEvent::new(
            "questions_inserted",
            json!({
                "ids": outcome.created.iter().map(|q| &q.id).collect::<Vec<_>>(),
                "failed": outcome.failed,
            }),
        ));

        Ok(outcome)
    }

    /// Apply a batch of identifier-keyed updates.
    ///
    /// Items without an identifier are dropped and counted; items with
    /// invalid or no fields are rejected and listed. The rest are submitted
    /// as independent updates in no particular order.
    pub async fn update_many(
        &self,
        items: Vec<Result<QuestionPatch, PatchError>>,
    ) -> Result<BulkUpdateOutcome, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::validation("updates array cannot be empty"));
        }

        let mut outcome = BulkUpdateOutcome::default();
        let mut pending = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            match item.and_then(QuestionPatch::into_update) {
                Ok((id, changes)) => pending.push((index, id, changes)),
                Err(PatchError::MissingId) => outcome.dropped_count += 1,
                Err(e) => outcome.rejected.push(ItemFailure::new(index, e.to_string())),
            }
        }

        if outcome.dropped_count > 0 {
            debug!("Dropped {} updates without an identifier", outcome.dropped_count);
        }

        let submitted = pending.len();
        if submitted == 0 {
            info!("No well-formed updates to apply");
            return Ok(outcome);
        }

        let store = &self.store;
        let mut results: Vec<_> = stream::iter(pending)
            .map(|(index, id, changes)| async move {
                let result = store.update_one(&id, &changes).await;
                (index, id, result)
            })
            .buffer_unordered(self.concurrency())
            .collect()
            .await;
        results.sort_by_key(|(index, _, _)| *index);

        let mut first_store_error = None;
        for (index, id, result) in results {
            match result {
                Ok(update) => outcome.record(update),
                Err(e) => {
                    warn!("Update of question {} failed: {}", id, e);
                    outcome.failed.push(ItemFailure::new(index, e.to_string()));
                    first_store_error.get_or_insert(e);
                }
            }
        }

        if outcome.failed.len() == submitted
            && let Some(err) = first_store_error
        {
            return Err(err.into());
        }

        if let Some(partial) = outcome.partial_failure(submitted) {
            warn!("Bulk update finished with failures: {}", partial);
        }
        info!(
            "Bulk update matched {} and modified {} questions",
            outcome.matched_count, outcome.modified_count
        );
        self.audit_logger.log(AuditEvent::new(
            "questions_updated",
            json!({
                "matchedCount": outcome.matched_count,
                "modifiedCount": outcome.modified_count,
                "droppedCount": outcome.dropped_count,
                "rejected": outcome.rejected,
                "failed": outcome.failed,
            }),
        ));

        Ok(outcome)
    }

    /// Delete every question whose id is listed.
    ///
    /// Duplicate ids are collapsed; unknown ids are ignored.
    pub async fn delete_many(&self, ids: Vec<QuestionId>) -> Result<BulkDeleteOutcome, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::validation("ids array cannot be empty"));
        }

        let mut seen = HashSet::new();
        let unique: Vec<QuestionId> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();

        let deleted_count = self.store.delete_many(&unique).await?;

        info!("Deleted {} of {} requested questions", deleted_count, unique.len());
        self.audit_logger.log(AuditEvent::new(
            "questions_deleted",
            json!({
                "requested": unique,
                "deletedCount": deleted_count,
            }),
        ));

        Ok(BulkDeleteOutcome { deleted_count })
    }
}
