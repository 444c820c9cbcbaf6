//! Bulk mutation outcomes
//!
//! Per-request results of bulk inserts, updates and deletes. These are plain
//! values: computed once per request and never persisted.

use crate::question::entities::Question;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One item of a batch that did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Position of the item in the submitted batch.
    pub index: usize,
    pub reason: String,
}

impl ItemFailure {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Outcome of one submitted item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome<T> {
    Succeeded(T),
    Failed(ItemFailure),
}

impl<T> ItemOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Succeeded(_))
    }
}

/// Split outcomes into successes and failures, keeping input order in both.
pub fn partition_outcomes<T>(outcomes: Vec<ItemOutcome<T>>) -> (Vec<T>, Vec<ItemFailure>) {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome {
            ItemOutcome::Succeeded(value) => succeeded.push(value),
            ItemOutcome::Failed(failure) => failed.push(failure),
        }
    }
    (succeeded, failed)
}

/// Result of a single identifier-keyed update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(modified),
        }
    }
}

/// Result of a bulk insert.
///
/// `created` is in input order; `failed` lists the items that were rejected
/// by validation or by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInsertOutcome {
    pub created: Vec<Question>,
    pub failed: Vec<ItemFailure>,
}

impl BulkInsertOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn partial_failure(&self) -> Option<PartialBatchError> {
        PartialBatchError::check(self.created.len(), self.failed.len())
    }
}

/// Result of a bulk update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Items without an identifier, dropped before submission.
    pub dropped_count: usize,
    /// Items with invalid field values, rejected before submission.
    pub rejected: Vec<ItemFailure>,
    /// Items that failed at the store.
    pub failed: Vec<ItemFailure>,
}

impl BulkUpdateOutcome {
    pub fn record(&mut self, result: UpdateResult) {
        self.matched_count += result.matched_count;
        self.modified_count += result.modified_count;
    }

    pub fn partial_failure(&self, submitted: usize) -> Option<PartialBatchError> {
        PartialBatchError::check(submitted.saturating_sub(self.failed.len()), self.failed.len())
    }
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteOutcome {
    pub deleted_count: u64,
}

/// Some items of a batch succeeded and others failed.
///
/// Not a request failure: it is derived from an outcome for logging and
/// reporting, while the request itself still succeeds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{failed} of {} items failed", .succeeded + .failed)]
pub struct PartialBatchError {
    pub succeeded: usize,
    pub failed: usize,
}

impl PartialBatchError {
    fn check(succeeded: usize, failed: usize) -> Option<Self> {
        (failed > 0).then_some(Self { succeeded, failed })
    }
}
