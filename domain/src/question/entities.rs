//! Question entities

use super::value_objects::{CorrectAnswer, ExamYear, QuestionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored catalog question (Entity)
///
/// Categorical fields are optional at the store level; the submit boundary
/// decides how strict to be (see [`SubmitPolicy`](crate::config::SubmitPolicy)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: QuestionId,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<CorrectAnswer>,
    #[serde(default)]
    pub exam_type: Option<String>,
    #[serde(default)]
    pub exam_year: Option<ExamYear>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Materialize a validated submission with its store-assigned id.
    pub fn from_new(id: QuestionId, new: NewQuestion, now: DateTime<Utc>) -> Self {
        Self {
            id,
            question_text: new.question_text,
            options: new.options,
            correct_answer: new.correct_answer,
            exam_type: new.exam_type,
            exam_year: new.exam_year,
            subject: new.subject,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a field-set update.
    ///
    /// Returns `true` if at least one stored value changed; `updated_at` is
    /// only touched in that case.
    pub fn apply(&mut self, changes: &QuestionChanges, now: DateTime<Utc>) -> bool {
        let mut modified = false;

        if let Some(text) = &changes.question_text {
            modified |= replace(&mut self.question_text, text.clone());
        }
        if let Some(options) = &changes.options {
            modified |= replace(&mut self.options, options.clone());
        }
        if let Some(answer) = &changes.correct_answer {
            modified |= replace(&mut self.correct_answer, Some(answer.clone()));
        }
        if let Some(exam_type) = &changes.exam_type {
            modified |= replace(&mut self.exam_type, Some(exam_type.clone()));
        }
        if let Some(year) = changes.exam_year {
            modified |= replace(&mut self.exam_year, Some(year));
        }
        if let Some(subject) = &changes.subject {
            modified |= replace(&mut self.subject, Some(subject.clone()));
        }
        if let Some(url) = &changes.image_url {
            modified |= replace(&mut self.image_url, url.clone());
        }

        if modified {
            self.updated_at = now;
        }
        modified
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// A validated question ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: Option<CorrectAnswer>,
    pub exam_type: Option<String>,
    pub exam_year: Option<ExamYear>,
    pub subject: Option<String>,
    pub image_url: String,
}

impl NewQuestion {
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            options: Vec::new(),
            correct_answer: None,
            exam_type: None,
            exam_year: None,
            subject: None,
            image_url: String::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_correct_answer(mut self, answer: CorrectAnswer) -> Self {
        self.correct_answer = Some(answer);
        self
    }

    pub fn with_exam_type(mut self, exam_type: impl Into<String>) -> Self {
        self.exam_type = Some(exam_type.into());
        self
    }

    pub fn with_exam_year(mut self, year: ExamYear) -> Self {
        self.exam_year = Some(year);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Validated field-set update for one question.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionChanges {
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<CorrectAnswer>,
    pub exam_type: Option<String>,
    pub exam_year: Option<ExamYear>,
    pub subject: Option<String>,
    pub image_url: Option<String>,
}

impl QuestionChanges {
    pub fn is_empty(&self) -> bool {
        self.question_text.is_none()
            && self.options.is_none()
            && self.correct_answer.is_none()
            && self.exam_type.is_none()
            && self.exam_year.is_none()
            && self.subject.is_none()
            && self.image_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(0, 0).unwrap()
    }

    fn sample() -> Question {
        let new = NewQuestion::new("2 + 2 = ?")
            .with_options(vec!["3".into(), "4".into()])
            .with_correct_answer(CorrectAnswer::Index(1))
            .with_exam_type("WAEC")
            .with_exam_year(ExamYear::new(2020).unwrap())
            .with_subject("Maths");
        Question::from_new(QuestionId::new("q1"), new, epoch())
    }

    #[test]
    fn test_apply_changes_updates_timestamp() {
        let mut question = sample();
        let later = epoch() + chrono::Duration::seconds(60);
        let changes = QuestionChanges {
            subject: Some("Mathematics".to_string()),
            ..Default::default()
        };

        assert!(question.apply(&changes, later));
        assert_eq!(question.subject.as_deref(), Some("Mathematics"));
        assert_eq!(question.updated_at, later);
        assert_eq!(question.created_at, epoch());
    }

    #[test]
    fn test_apply_identical_values_is_not_a_modification() {
        let mut question = sample();
        let later = epoch() + chrono::Duration::seconds(60);
        let changes = QuestionChanges {
            subject: Some("Maths".to_string()),
            exam_year: Some(ExamYear::new(2020).unwrap()),
            ..Default::default()
        };

        assert!(!question.apply(&changes, later));
        assert_eq!(question.updated_at, epoch());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], "q1");
        assert_eq!(value["questionText"], "2 + 2 = ?");
        assert_eq!(value["examType"], "WAEC");
        assert_eq!(value["examYear"], 2020);
        assert_eq!(value["correctAnswer"], 1);
        assert_eq!(value["imageUrl"], "");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(QuestionChanges::default().is_empty());
        let changes = QuestionChanges {
            image_url: Some(String::new()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
