//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid exam year: {0} (expected a 4-digit year)")]
    InvalidExamYear(i64),

    #[error("Invalid identifier: '{0}'")]
    InvalidId(String),
}

impl DomainError {
    /// Check if this error was caused by an absent field
    pub fn is_missing_field(&self) -> bool {
        matches!(self, DomainError::MissingField(_))
    }
}
