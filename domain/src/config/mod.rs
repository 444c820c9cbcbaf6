//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod submit_policy;
mod validation;

pub use submit_policy::SubmitPolicy;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
