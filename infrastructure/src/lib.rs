//! Infrastructure layer for question-catalog
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod store;
pub mod usage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAnalyticsConfig, FileConfig, FileEngineConfig, FileLoggingConfig,
    FileServerConfig, FileStoreConfig,
};
pub use logging::JsonlAuditLogger;
pub use store::InMemoryDocumentStore;
pub use usage::{InMemoryUsageStats, UsageData};
