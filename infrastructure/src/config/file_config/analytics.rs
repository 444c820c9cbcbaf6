//! Analytics configuration from TOML (`[analytics]` section)

use catalog_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw usage analytics configuration from TOML
///
/// # Example
///
/// ```toml
/// [analytics]
/// data_file = "data/usage.json"   # seed for profiles and practice tests
/// active_window_months = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalyticsConfig {
    pub data_file: Option<PathBuf>,
    /// A user is active if their last quiz falls within this many months
    pub active_window_months: u32,
}

impl Default for FileAnalyticsConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            active_window_months: 2,
        }
    }
}

impl FileAnalyticsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.active_window_months == 0 {
            return vec![ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "analytics.active_window_months".to_string(),
                },
                "analytics.active_window_months must be at least 1",
            )];
        }
        vec![]
    }
}
