//! Domain layer for question-catalog
//!
//! This crate contains the catalog's entities, value objects and the pure
//! parts of the catalog engine. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Question
//!
//! A multiple-choice exam question, categorized by `examType`, `examYear`
//! and `subject`. Categories are optional at the store level and enforced at
//! the submit boundary according to a [`SubmitPolicy`].
//!
//! ## Catalog engine (pure parts)
//!
//! - **Filter**: [`CatalogFilter`] → [`QuestionPredicate`]
//! - **Aggregation**: questions → sorted [`AggregateGroup`]s
//! - **Outcomes**: per-item results of bulk insert/update/delete

pub mod catalog;
pub mod config;
pub mod core;
pub mod question;

// Re-export commonly used types
pub use catalog::{
    aggregation::{AggregateGroup, CatalogAggregation, GroupKey, group_key, sort_groups},
    filter::{
        CatalogFilter, FieldCondition, FieldValue, QuestionField, QuestionPredicate,
        build_predicate,
    },
    outcome::{
        BulkDeleteOutcome, BulkInsertOutcome, BulkUpdateOutcome, ItemFailure, ItemOutcome,
        PartialBatchError, UpdateResult, partition_outcomes,
    },
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity, SubmitPolicy};
pub use core::error::DomainError;
pub use question::{
    draft::{QuestionDraft, RawYear},
    entities::{NewQuestion, Question, QuestionChanges},
    patch::{PatchError, QuestionPatch},
    value_objects::{CorrectAnswer, ExamYear, QuestionId},
};
