//! Usage statistics port
//!
//! Scalar counters over user profiles and practice-test records. These live
//! outside the question catalog; the port only needs counts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while reading usage statistics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageStatsError {
    #[error("Connection error: {0}")]
    Unavailable(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Which practice tests to count. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeTestFilter {
    pub mode: Option<String>,
    pub exam: Option<String>,
}

impl PracticeTestFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Empty strings count as absent.
    pub fn by_mode(mode: Option<&str>) -> Self {
        Self {
            mode: present(mode),
            exam: None,
        }
    }

    /// Empty strings count as absent.
    pub fn by_exam(exam: Option<&str>) -> Self {
        Self {
            mode: None,
            exam: present(exam),
        }
    }

    pub fn matches(&self, mode: Option<&str>, exam: Option<&str>) -> bool {
        let field_matches = |wanted: &Option<String>, actual: Option<&str>| match wanted {
            Some(w) => actual == Some(w.as_str()),
            None => true,
        };
        field_matches(&self.mode, mode) && field_matches(&self.exam, exam)
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Port for usage counters
#[async_trait]
pub trait UsageStatsPort: Send + Sync {
    /// Number of registered user profiles.
    async fn count_users(&self) -> Result<u64, UsageStatsError>;

    /// Number of profiles whose last quiz was taken at or after `since`.
    async fn count_active_users(&self, since: DateTime<Utc>) -> Result<u64, UsageStatsError>;

    /// Number of practice tests matching the filter.
    async fn count_practice_tests(
        &self,
        filter: &PracticeTestFilter,
    ) -> Result<u64, UsageStatsError>;
}
