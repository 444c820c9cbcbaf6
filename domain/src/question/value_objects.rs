//! Question value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Store-assigned question identifier (Value Object)
///
/// Opaque to the engine: it is only compared for equality and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a caller-supplied identifier, rejecting blank values.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A four-digit exam year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ExamYear(i32);

impl ExamYear {
    pub const MIN: i32 = 1000;
    pub const MAX: i32 = 9999;

    pub fn new(year: i64) -> Result<Self, DomainError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&year) {
            Ok(Self(year as i32))
        } else {
            Err(DomainError::InvalidExamYear(year))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for ExamYear {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExamYear> for i64 {
    fn from(year: ExamYear) -> Self {
        year.0 as i64
    }
}

impl std::fmt::Display for ExamYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The correct answer of a question.
///
/// Either the answer text or an index into `options`. The engine never checks
/// it against the options; interpretation belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(u32),
    Text(String),
}

impl CorrectAnswer {
    pub fn is_blank(&self) -> bool {
        matches!(self, CorrectAnswer::Text(text) if text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_year_bounds() {
        assert!(ExamYear::new(2020).is_ok());
        assert!(ExamYear::new(1000).is_ok());
        assert!(ExamYear::new(9999).is_ok());
        assert!(matches!(
            ExamYear::new(999),
            Err(DomainError::InvalidExamYear(999))
        ));
        assert!(ExamYear::new(10000).is_err());
        assert!(ExamYear::new(-2020).is_err());
    }

    #[test]
    fn test_exam_year_serializes_as_integer() {
        let year = ExamYear::new(2019).unwrap();
        assert_eq!(serde_json::to_string(&year).unwrap(), "2019");

        let parsed: ExamYear = serde_json::from_str("2021").unwrap();
        assert_eq!(parsed.value(), 2021);

        assert!(serde_json::from_str::<ExamYear>("21").is_err());
    }

    #[test]
    fn test_question_id_parse_trims_and_rejects_blank() {
        assert_eq!(QuestionId::parse(" abc ").unwrap().as_str(), "abc");
        assert!(QuestionId::parse("   ").is_err());
    }

    #[test]
    fn test_correct_answer_untagged() {
        let index: CorrectAnswer = serde_json::from_str("2").unwrap();
        assert_eq!(index, CorrectAnswer::Index(2));

        let text: CorrectAnswer = serde_json::from_str("\"Paris\"").unwrap();
        assert_eq!(text, CorrectAnswer::Text("Paris".to_string()));
        assert!(!text.is_blank());
        assert!(CorrectAnswer::Text("  ".to_string()).is_blank());
    }
}
