//! Filter builder.
//!
//! Turns the three recognized query attributes into a [`QuestionPredicate`]
//! that a document store can evaluate natively (or via
//! [`QuestionPredicate::matches`] for stores without a query language).
//!
//! Matching is exact and case-sensitive. Absent attributes impose no
//! constraint, so an empty [`CatalogFilter`] matches every question.

use crate::question::entities::Question;
use serde::{Deserialize, Serialize};

/// A question field that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionField {
    ExamType,
    ExamYear,
    Subject,
}

impl QuestionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionField::ExamType => "examType",
            QuestionField::ExamYear => "examYear",
            QuestionField::Subject => "subject",
        }
    }
}

impl std::fmt::Display for QuestionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed filter value.
///
/// Equality is typed: an `Integer` never equals a text field and a `Text`
/// never equals the integer `examYear` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

/// One `field == value` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub field: QuestionField,
    pub value: FieldValue,
}

impl FieldCondition {
    pub fn matches(&self, question: &Question) -> bool {
        match (self.field, &self.value) {
            (QuestionField::ExamType, FieldValue::Text(v)) => {
                question.exam_type.as_deref() == Some(v.as_str())
            }
            (QuestionField::Subject, FieldValue::Text(v)) => {
                question.subject.as_deref() == Some(v.as_str())
            }
            (QuestionField::ExamYear, FieldValue::Integer(v)) => {
                question.exam_year.map(|y| i64::from(y.value())) == Some(*v)
            }
            _ => false,
        }
    }
}

/// Store-native predicate: a conjunction of field conditions.
///
/// No conditions means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPredicate {
    conditions: Vec<FieldCondition>,
}

impl QuestionPredicate {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn is_match_all(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[FieldCondition] {
        &self.conditions
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.conditions.iter().all(|c| c.matches(question))
    }
}

/// The recognized filter attributes and their present/absent state.
///
/// Built once per request and handed to [`build_predicate`] as an
/// immutable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    pub exam_type: Option<String>,
    pub exam_year: Option<FieldValue>,
    pub subject: Option<String>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw query-string values.
    ///
    /// Empty strings count as absent. A year that parses as an integer
    /// becomes an integer condition; anything else is kept as text and
    /// will match nothing.
    pub fn from_params(
        exam_type: Option<&str>,
        exam_year: Option<&str>,
        subject: Option<&str>,
    ) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

        let exam_year = present(exam_year).map(|raw| match raw.trim().parse::<i64>() {
            Ok(year) => FieldValue::Integer(year),
            Err(_) => FieldValue::Text(raw),
        });

        Self {
            exam_type: present(exam_type),
            exam_year,
            subject: present(subject),
        }
    }

    pub fn with_exam_type(mut self, exam_type: impl Into<String>) -> Self {
        self.exam_type = Some(exam_type.into());
        self
    }

    pub fn with_exam_year(mut self, year: i64) -> Self {
        self.exam_year = Some(FieldValue::Integer(year));
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exam_type.is_none() && self.exam_year.is_none() && self.subject.is_none()
    }
}

/// Translate a filter into a store predicate.
pub fn build_predicate(filter: &CatalogFilter) -> QuestionPredicate {
    let mut conditions = Vec::with_capacity(3);

    if let Some(exam_type) = &filter.exam_type {
        conditions.push(FieldCondition {
            field: QuestionField::ExamType,
            value: FieldValue::Text(exam_type.clone()),
        });
    }
    if let Some(year) = &filter.exam_year {
        conditions.push(FieldCondition {
            field: QuestionField::ExamYear,
            value: year.clone(),
        });
    }
    if let Some(subject) = &filter.subject {
        conditions.push(FieldCondition {
            field: QuestionField::Subject,
            value: FieldValue::Text(subject.clone()),
        });
    }

    QuestionPredicate { conditions }
}
