//! Engine parameters - catalog engine control.
//!
//! [`EngineParams`] groups the static parameters that control how the
//! [`CatalogEngine`](crate::use_cases::catalog_engine::CatalogEngine) and its
//! bulk coordinator behave. These are application-layer concerns, not domain
//! policy.

use catalog_domain::SubmitPolicy;
use serde::{Deserialize, Serialize};

/// Catalog engine control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineParams {
    /// Maximum number of store updates in flight during one bulk update.
    pub max_in_flight: usize,
    /// How strictly `submit` validates categorical fields.
    pub submit_policy: SubmitPolicy,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_in_flight: 16,
            submit_policy: SubmitPolicy::default(),
        }
    }
}

impl EngineParams {
    // ==================== Builder Methods ====================

    /// Values below 1 are raised to 1.
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    pub fn with_submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }
}
