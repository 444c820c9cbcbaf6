//! Usage analytics use case
//!
//! Scalar usage metrics: registered users, recently active users and
//! practice-test counts.

use crate::ports::usage_stats::{PracticeTestFilter, UsageStatsError, UsageStatsPort};
use chrono::{DateTime, Months, Utc};
use std::sync::Arc;
use tracing::debug;

/// Use case for reading usage counters
pub struct UsageAnalytics {
    stats: Arc<dyn UsageStatsPort>,
    active_window_months: u32,
}

impl UsageAnalytics {
    pub const DEFAULT_ACTIVE_WINDOW_MONTHS: u32 = 2;

    pub fn new(stats: Arc<dyn UsageStatsPort>) -> Self {
        Self {
            stats,
            active_window_months: Self::DEFAULT_ACTIVE_WINDOW_MONTHS,
        }
    }

    pub fn with_active_window_months(mut self, months: u32) -> Self {
        self.active_window_months = months;
        self
    }

    /// Start of the active-user window: `now` minus the configured number of
    /// calendar months.
    pub fn active_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.active_window_months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub async fn total_users(&self) -> Result<u64, UsageStatsError> {
        self.stats.count_users().await
    }

    pub async fn active_users(&self) -> Result<u64, UsageStatsError> {
        self.active_users_at(Utc::now()).await
    }

    pub async fn active_users_at(&self, now: DateTime<Utc>) -> Result<u64, UsageStatsError> {
        let since = self.active_cutoff(now);
        debug!("Counting users active since {}", since);
        self.stats.count_active_users(since).await
    }

    pub async fn total_practice_tests(&self) -> Result<u64, UsageStatsError> {
        self.stats
            .count_practice_tests(&PracticeTestFilter::all())
            .await
    }

    /// Empty or absent `mode` counts every practice test.
    pub async fn practice_tests_by_mode(&self, mode: Option<&str>) -> Result<u64, UsageStatsError> {
        self.stats
            .count_practice_tests(&PracticeTestFilter::by_mode(mode))
            .await
    }

    /// Empty or absent `exam` counts every practice test.
    pub async fn practice_tests_by_exam(&self, exam: Option<&str>) -> Result<u64, UsageStatsError> {
        self.stats
            .count_practice_tests(&PracticeTestFilter::by_exam(exam))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockStats {
        since: Mutex<Option<DateTime<Utc>>>,
        filters: Mutex<Vec<PracticeTestFilter>>,
        unavailable: bool,
    }

    #[async_trait]
    impl UsageStatsPort for MockStats {
        async fn count_users(&self) -> Result<u64, UsageStatsError> {
            if self.unavailable {
                return Err(UsageStatsError::Unavailable("profiles offline".into()));
            }
            Ok(42)
        }

        async fn count_active_users(&self, since: DateTime<Utc>) -> Result<u64, UsageStatsError> {
            *self.since.lock().unwrap() = Some(since);
            Ok(7)
        }

        async fn count_practice_tests(
            &self,
            filter: &PracticeTestFilter,
        ) -> Result<u64, UsageStatsError> {
            self.filters.lock().unwrap().push(filter.clone());
            Ok(3)
        }
    }

    #[tokio::test]
    async fn test_active_users_window() {
        let stats = Arc::new(MockStats::default());
        let analytics = UsageAnalytics::new(stats.clone());
        let now = Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap();

        assert_eq!(analytics.active_users_at(now).await.unwrap(), 7);
        assert_eq!(
            stats.since.lock().unwrap().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_configurable_window() {
        let analytics =
            UsageAnalytics::new(Arc::new(MockStats::default())).with_active_window_months(1);
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        // Clamped to the last day of February.
        assert_eq!(
            analytics.active_cutoff(now),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_practice_test_filters() {
        let stats = Arc::new(MockStats::default());
        let analytics = UsageAnalytics::new(stats.clone());

        analytics.total_practice_tests().await.unwrap();
        analytics.practice_tests_by_mode(Some("timed")).await.unwrap();
        analytics.practice_tests_by_exam(Some("")).await.unwrap();

        let filters = stats.filters.lock().unwrap();
        assert_eq!(filters[0], PracticeTestFilter::all());
        assert_eq!(filters[1].mode.as_deref(), Some("timed"));
        assert_eq!(filters[2], PracticeTestFilter::all());
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let stats = Arc::new(MockStats {
            unavailable: true,
            ..Default::default()
        });
        let err = UsageAnalytics::new(stats).total_users().await.unwrap_err();
        assert_eq!(err.to_string(), "Connection error: profiles offline");
    }
}
