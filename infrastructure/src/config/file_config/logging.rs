//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// audit_log = "logs/catalog.audit.jsonl"   # one JSON line per catalog mutation
/// file = "logs/question-catalog.log"       # diagnostic log, in addition to stderr
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub audit_log: Option<PathBuf>,
    pub file: Option<PathBuf>,
}
