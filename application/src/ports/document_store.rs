//! Document store port
//!
//! Defines the interface to the persistent collection of question records.

use async_trait::async_trait;
use catalog_domain::{
    AggregateGroup, CatalogAggregation, NewQuestion, Question, QuestionChanges, QuestionId,
    QuestionPredicate, UpdateResult,
};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during document store operations
///
/// The message is forwarded to callers as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Unavailable(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Capability interface over the question collection
///
/// Implementations (adapters) live in the infrastructure layer. Each method
/// is atomic for the documents it touches; nothing spans documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one validated question. The store assigns the id and timestamps.
    async fn insert_one(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// Insert a batch. Returns one result per question, in input order.
    ///
    /// Default implementation inserts one at a time. Stores with a native
    /// batch write should override this.
    async fn insert_many(&self, questions: Vec<NewQuestion>) -> Vec<Result<Question, StoreError>> {
        let mut results = Vec::with_capacity(questions.len());
        for question in questions {
            results.push(self.insert_one(question).await);
        }
        results
    }

    /// All questions matching the predicate, in store order.
    async fn find(&self, predicate: &QuestionPredicate) -> Result<Vec<Question>, StoreError>;

    /// Set the given fields on the question with this id.
    ///
    /// A missing id is not an error: it yields a zero `matched_count`.
    async fn update_one(
        &self,
        id: &QuestionId,
        changes: &QuestionChanges,
    ) -> Result<UpdateResult, StoreError>;

    /// Delete every question whose id is in `ids`; returns how many were removed.
    async fn delete_many(&self, ids: &[QuestionId]) -> Result<u64, StoreError>;

    /// Group all questions by `(subject, examType)`.
    ///
    /// Default implementation scans the whole collection and folds it in
    /// memory. Stores with native aggregation should override this.
    async fn aggregate_groups(&self) -> Result<Vec<AggregateGroup>, StoreError> {
        let questions = self.find(&QuestionPredicate::match_all()).await?;
        Ok(CatalogAggregation::from_questions(&questions).into_groups())
    }
}
