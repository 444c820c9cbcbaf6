//! Application layer for question-catalog
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineParams;
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    document_store::{DocumentStore, StoreError},
    usage_stats::{PracticeTestFilter, UsageStatsError, UsageStatsPort},
};
pub use use_cases::bulk_mutation::BulkMutationCoordinator;
pub use use_cases::catalog_engine::{CatalogEngine, CatalogError, Fault, QueryResult, SubmitResult};
pub use use_cases::payload::{SubmitPayload, UpdateBatch, ids_from_json};
pub use use_cases::usage_analytics::UsageAnalytics;
