//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types with
//! the issues found along the way.

mod analytics;
mod engine;
mod logging;
mod server;
mod store;

pub use analytics::FileAnalyticsConfig;
pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;
pub use store::FileStoreConfig;

use catalog_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Document store settings
    pub store: FileStoreConfig,
    /// Catalog engine settings
    pub engine: FileEngineConfig,
    /// Audit and diagnostic log files
    pub logging: FileLoggingConfig,
    /// Usage analytics settings
    pub analytics: FileAnalyticsConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The server address parses
    /// 2. Engine parameters (submit policy, write concurrency)
    /// 3. The analytics window
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.server.parse_address().1);
        issues.extend(self.engine.to_engine_params().1);
        issues.extend(self.analytics.validate());

        issues
    }
}
