//! Usage statistics adapters.

mod in_memory;

pub use in_memory::{InMemoryUsageStats, PracticeTestRecord, UsageData, UserProfile};
