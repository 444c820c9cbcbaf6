//! In-memory usage counters, optionally seeded from a JSON file.

use async_trait::async_trait;
use catalog_application::ports::usage_stats::{
    PracticeTestFilter, UsageStatsError, UsageStatsPort,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

/// A registered user, reduced to what the counters need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub last_quiz_date: Option<DateTime<Utc>>,
}

/// One taken practice test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeTestRecord {
    pub mode: Option<String>,
    pub exam: Option<String>,
}

/// Seed file layout.
///
/// ```json
/// {
///   "profiles": [{"lastQuizDate": "2024-05-01T10:00:00Z"}],
///   "practiceTests": [{"mode": "timed", "exam": "WAEC"}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageData {
    pub profiles: Vec<UserProfile>,
    pub practice_tests: Vec<PracticeTestRecord>,
}

/// [`UsageStatsPort`] backed by in-memory records.
#[derive(Debug, Default)]
pub struct InMemoryUsageStats {
    data: RwLock<UsageData>,
}

impl InMemoryUsageStats {
    pub fn new(data: UsageData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Seed from a JSON file. A missing file yields empty counters.
    pub async fn load(path: &Path) -> Result<Self, UsageStatsError> {
        let data = match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice::<UsageData>(&bytes).map_err(|e| {
                UsageStatsError::Other(format!("{} is not a usage seed: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => UsageData::default(),
            Err(e) => {
                return Err(UsageStatsError::Unavailable(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        info!(
            "Loaded usage data from {} ({} profiles, {} practice tests)",
            path.display(),
            data.profiles.len(),
            data.practice_tests.len()
        );
        Ok(Self::new(data))
    }

    pub async fn add_profile(&self, profile: UserProfile) {
        self.data.write().await.profiles.push(profile);
    }

    pub async fn add_practice_test(&self, record: PracticeTestRecord) {
        self.data.write().await.practice_tests.push(record);
    }
}

#[async_trait]
impl UsageStatsPort for InMemoryUsageStats {
    async fn count_users(&self) -> Result<u64, UsageStatsError> {
        Ok(self.data.read().await.profiles.len() as u64)
    }

    async fn count_active_users(&self, since: DateTime<Utc>) -> Result<u64, UsageStatsError> {
        let data = self.data.read().await;
        let active = data
            .profiles
            .iter()
            .filter(|p| p.last_quiz_date.is_some_and(|d| d >= since))
            .count();
        Ok(active as u64)
    }

    async fn count_practice_tests(
        &self,
        filter: &PracticeTestFilter,
    ) -> Result<u64, UsageStatsError> {
        let data = self.data.read().await;
        let count = data
            .practice_tests
            .iter()
            .filter(|t| filter.matches(t.mode.as_deref(), t.exam.as_deref()))
            .count();
        Ok(count as u64)
    }
}
