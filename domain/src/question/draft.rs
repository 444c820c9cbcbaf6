//! Submission payloads
//!
//! A [`QuestionDraft`] is what a caller sends: every field is optional and
//! loosely typed so that one bad item in a batch can be reported on its own
//! instead of failing the whole request at parse time.

use super::entities::NewQuestion;
use super::value_objects::{CorrectAnswer, ExamYear};
use crate::config::SubmitPolicy;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// An exam year as submitted: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawYear {
    Number(i64),
    Text(String),
}

impl RawYear {
    pub fn to_exam_year(&self) -> Result<ExamYear, DomainError> {
        match self {
            RawYear::Number(n) => ExamYear::new(*n),
            RawYear::Text(text) => text.trim().parse::<i64>().map_or_else(
                |_| {
                    Err(DomainError::InvalidQuestion(format!(
                        "examYear must be an integer, got '{}'",
                        text
                    )))
                },
                ExamYear::new,
            ),
        }
    }
}

/// A question as submitted by a caller (unvalidated)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionDraft {
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<CorrectAnswer>,
    pub exam_type: Option<String>,
    pub exam_year: Option<RawYear>,
    pub subject: Option<String>,
    pub image_url: Option<String>,
}

impl QuestionDraft {
    /// Decode one submitted JSON value.
    ///
    /// Non-object values and wrongly typed fields become
    /// [`DomainError::InvalidQuestion`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, DomainError> {
        if !value.is_object() {
            return Err(DomainError::InvalidQuestion(
                "expected a question object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DomainError::InvalidQuestion(e.to_string()))
    }

    /// Validate the draft under the given submit policy.
    pub fn validate(&self, policy: SubmitPolicy) -> Result<NewQuestion, DomainError> {
        let question_text = non_blank(self.question_text.as_deref())
            .ok_or(DomainError::MissingField("questionText"))?;

        let options = self.options.clone().unwrap_or_default();
        if let Some(pos) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(DomainError::InvalidQuestion(format!(
                "options[{}] is empty",
                pos
            )));
        }

        let exam_year = self.exam_year.as_ref().map(RawYear::to_exam_year).transpose()?;
        let exam_type = non_blank(self.exam_type.as_deref());
        let subject = non_blank(self.subject.as_deref());

        if policy.requires_categories() {
            if exam_type.is_none() {
                return Err(DomainError::MissingField("examType"));
            }
            if exam_year.is_none() {
                return Err(DomainError::MissingField("examYear"));
            }
            if subject.is_none() {
                return Err(DomainError::MissingField("subject"));
            }
        }

        Ok(NewQuestion {
            question_text,
            options,
            correct_answer: self.correct_answer.clone().filter(|a| !a.is_blank()),
            exam_type,
            exam_year,
            subject,
            image_url: self.image_url.clone().unwrap_or_default(),
        })
    }
}

/// Blank strings count as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_draft() -> QuestionDraft {
        QuestionDraft::from_json(json!({
            "questionText": "Capital of France?",
            "options": ["Paris", "Lyon"],
            "correctAnswer": "Paris",
            "examType": "WAEC",
            "examYear": 2021,
            "subject": "Geography"
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_full_draft() {
        let question = full_draft().validate(SubmitPolicy::RequireCategories).unwrap();
        assert_eq!(question.question_text, "Capital of France?");
        assert_eq!(question.options.len(), 2);
        assert_eq!(question.exam_year.unwrap().value(), 2021);
        assert_eq!(question.image_url, "");
    }

    #[test]
    fn test_missing_question_text() {
        let mut draft = full_draft();
        draft.question_text = None;
        assert_eq!(
            draft.validate(SubmitPolicy::Relaxed),
            Err(DomainError::MissingField("questionText"))
        );

        draft.question_text = Some("   ".to_string());
        assert_eq!(
            draft.validate(SubmitPolicy::Relaxed),
            Err(DomainError::MissingField("questionText"))
        );
    }

    #[test]
    fn test_categories_required_by_default_policy() {
        let draft = QuestionDraft {
            question_text: Some("What is 2 + 2?".to_string()),
            ..Default::default()
        };

        assert_eq!(
            draft.validate(SubmitPolicy::RequireCategories),
            Err(DomainError::MissingField("examType"))
        );

        let relaxed = draft.validate(SubmitPolicy::Relaxed).unwrap();
        assert!(relaxed.options.is_empty());
        assert!(relaxed.subject.is_none());
    }

    #[test]
    fn test_exam_year_as_numeric_text() {
        let mut draft = full_draft();
        draft.exam_year = Some(RawYear::Text(" 2019 ".to_string()));
        let question = draft.validate(SubmitPolicy::RequireCategories).unwrap();
        assert_eq!(question.exam_year.unwrap().value(), 2019);

        draft.exam_year = Some(RawYear::Text("last year".to_string()));
        assert!(matches!(
            draft.validate(SubmitPolicy::RequireCategories),
            Err(DomainError::InvalidQuestion(_))
        ));

        draft.exam_year = Some(RawYear::Number(19));
        assert_eq!(
            draft.validate(SubmitPolicy::RequireCategories),
            Err(DomainError::InvalidExamYear(19))
        );
    }

    #[test]
    fn test_blank_option_rejected() {
        let mut draft = full_draft();
        draft.options = Some(vec!["A".to_string(), " ".to_string()]);
        assert_eq!(
            draft.validate(SubmitPolicy::Relaxed),
            Err(DomainError::InvalidQuestion("options[1] is empty".to_string()))
        );
    }

    #[test]
    fn test_from_json_rejects_non_objects_and_bad_types() {
        assert!(QuestionDraft::from_json(json!("text")).is_err());
        assert!(QuestionDraft::from_json(json!({"options": 5})).is_err());
    }

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let draft = QuestionDraft::from_json(json!({
            "questionText": "Q",
            "difficulty": "hard"
        }))
        .unwrap();
        assert_eq!(draft.question_text.as_deref(), Some("Q"));
    }
}
