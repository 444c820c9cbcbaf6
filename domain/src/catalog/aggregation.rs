//! Aggregation pipeline.
//!
//! Groups questions by the exact `(subject, examType)` pair and collects the
//! distinct exam years of each group. Questions without a subject or exam
//! type land in the group whose key has that field as `None`, so every
//! question belongs to exactly one group.

use crate::question::entities::Question;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Grouping key: `(subject, examType)`.
pub type GroupKey = (Option<String>, Option<String>);

/// One projected group.
///
/// `years` is a set; it is rendered as a JSON array but callers must not rely
/// on its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGroup {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub years: BTreeSet<i32>,
}

impl AggregateGroup {
    pub fn key(&self) -> GroupKey {
        (self.subject.clone(), self.exam_type.clone())
    }
}

/// The group a question belongs to.
pub fn group_key(question: &Question) -> GroupKey {
    (question.subject.clone(), question.exam_type.clone())
}

/// Incremental `(subject, examType)` grouping.
#[derive(Debug, Default)]
pub struct CatalogAggregation {
    groups: BTreeMap<GroupKey, BTreeSet<i32>>,
}

impl CatalogAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_questions<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Self {
        let mut aggregation = Self::new();
        for question in questions {
            aggregation.add(question);
        }
        aggregation
    }

    /// Add one question to its group.
    pub fn add(&mut self, question: &Question) {
        let years = self.groups.entry(group_key(question)).or_default();
        if let Some(year) = question.exam_year {
            years.insert(year.value());
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Project into groups sorted ascending by subject (absent subject first).
    pub fn into_groups(self) -> Vec<AggregateGroup> {
        self.groups
            .into_iter()
            .map(|((subject, exam_type), years)| AggregateGroup {
                subject,
                exam_type,
                years,
            })
            .collect()
    }
}

/// Order groups ascending by subject.
///
/// The sort is stable: groups with the same subject keep the order they came in.
pub fn sort_groups(groups: &mut [AggregateGroup]) {
    groups.sort_by(|a, b| a.subject.cmp(&b.subject));
}
