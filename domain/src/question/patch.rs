//! Partial-update payloads for bulk updates

use super::draft::{RawYear, non_blank};
use super::entities::QuestionChanges;
use super::value_objects::{CorrectAnswer, QuestionId};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a patch could not be turned into a store update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// No usable identifier. Such items are dropped, not reported as failures.
    #[error("update is missing an identifier")]
    MissingId,

    #[error("{0}")]
    Invalid(#[from] DomainError),

    #[error("update carries no fields to set")]
    NoChanges,
}

/// One item of a bulk update request: an identifier plus the fields to set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionPatch {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<CorrectAnswer>,
    pub exam_type: Option<String>,
    pub exam_year: Option<RawYear>,
    pub subject: Option<String>,
    pub image_url: Option<String>,
}

impl QuestionPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Decode one bulk-update item.
    ///
    /// An object whose `id` is not a string is treated as having no id.
    pub fn from_json(value: serde_json::Value) -> Result<Self, PatchError> {
        let serde_json::Value::Object(mut map) = value else {
            return Err(PatchError::MissingId);
        };

        let candidates: Vec<_> = ["id", "_id"]
            .iter()
            .filter_map(|key| map.remove(*key))
            .collect();
        let id = candidates
            .iter()
            .find_map(|v| v.as_str().map(str::to_string));

        match serde_json::from_value::<QuestionPatch>(serde_json::Value::Object(map)) {
            Ok(mut patch) => {
                patch.id = id;
                Ok(patch)
            }
            Err(_) if id.is_none() => Err(PatchError::MissingId),
            Err(e) => Err(PatchError::Invalid(DomainError::InvalidQuestion(
                e.to_string(),
            ))),
        }
    }

    /// Split into the target id and a validated field set.
    ///
    /// A missing id is checked first so that malformed items without an id
    /// are always counted as dropped.
    pub fn into_update(self) -> Result<(QuestionId, QuestionChanges), PatchError> {
        let id = self
            .id
            .as_deref()
            .and_then(|raw| QuestionId::parse(raw).ok())
            .ok_or(PatchError::MissingId)?;

        let question_text = match self.question_text.as_deref() {
            Some(text) => Some(
                non_blank(Some(text)).ok_or(DomainError::InvalidQuestion(
                    "questionText cannot be blank".to_string(),
                ))?,
            ),
            None => None,
        };

        if let Some(options) = &self.options
            && let Some(pos) = options.iter().position(|o| o.trim().is_empty())
        {
            return Err(DomainError::InvalidQuestion(format!("options[{}] is empty", pos)).into());
        }

        let exam_year = self.exam_year.as_ref().map(RawYear::to_exam_year).transpose()?;
        let exam_type = category("examType", self.exam_type.as_deref())?;
        let subject = category("subject", self.subject.as_deref())?;

        let changes = QuestionChanges {
            question_text,
            options: self.options,
            correct_answer: self.correct_answer,
            exam_type,
            exam_year,
            subject,
            image_url: self.image_url,
        };

        if changes.is_empty() {
            return Err(PatchError::NoChanges);
        }

        Ok((id, changes))
    }
}

/// A categorical label may be left out of an update but never set blank.
fn category(field: &str, value: Option<&str>) -> Result<Option<String>, DomainError> {
    match value {
        None => Ok(None),
        Some(raw) => non_blank(Some(raw)).map(Some).ok_or_else(|| {
            DomainError::InvalidQuestion(format!("{} cannot be blank", field))
        }),
    }
}
