//! Store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw document store configuration from TOML
///
/// # Example
///
/// ```toml
/// [store]
/// data_file = "data/questions.json"   # JSON snapshot, rewritten after each mutation
/// operation_timeout_ms = 2000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Snapshot file; the store is memory-only when unset
    pub data_file: Option<PathBuf>,
    /// Per-operation timeout in milliseconds
    pub operation_timeout_ms: Option<u64>,
}

impl FileStoreConfig {
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
