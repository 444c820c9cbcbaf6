//! Request payload decoding
//!
//! Turns loosely typed JSON request bodies into the engine's inputs. Batch
//! items are decoded one at a time so a single malformed item is reported
//! on its own instead of failing the whole request.

use super::catalog_engine::CatalogError;
use catalog_domain::{DomainError, PatchError, QuestionDraft, QuestionId, QuestionPatch};
use serde_json::Value;

/// What a caller submitted to `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPayload {
    /// One question object.
    Single(QuestionDraft),
    /// A sequence of question objects, each decoded independently.
    Batch(Vec<Result<QuestionDraft, DomainError>>),
}

impl SubmitPayload {
    /// An array becomes a batch and an object a single submission. Anything
    /// else, or an object with wrongly typed fields, is a validation error.
    pub fn from_json(value: Value) -> Result<Self, CatalogError> {
        match value {
            Value::Array(items) => Ok(Self::Batch(
                items.into_iter().map(QuestionDraft::from_json).collect(),
            )),
            object @ Value::Object(_) => Ok(Self::Single(QuestionDraft::from_json(object)?)),
            _ => Err(CatalogError::validation(
                "expected a question object or an array of questions",
            )),
        }
    }

    pub fn batch(drafts: Vec<QuestionDraft>) -> Self {
        Self::Batch(drafts.into_iter().map(Ok).collect())
    }
}

/// The items of a bulk update, each decoded independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateBatch(pub Vec<Result<QuestionPatch, PatchError>>);

impl UpdateBatch {
    pub fn from_json(value: Value) -> Result<Self, CatalogError> {
        match value {
            Value::Array(items) => Ok(Self(
                items.into_iter().map(QuestionPatch::from_json).collect(),
            )),
            _ => Err(CatalogError::validation("updates must be an array")),
        }
    }

    pub fn from_patches(patches: Vec<QuestionPatch>) -> Self {
        Self(patches.into_iter().map(Ok).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_items(self) -> Vec<Result<QuestionPatch, PatchError>> {
        self.0
    }
}

/// Decode the identifier list of a bulk delete.
///
/// Every element must be a non-blank string. Emptiness is checked by the
/// coordinator.
pub fn ids_from_json(value: Value) -> Result<Vec<QuestionId>, CatalogError> {
    let Value::Array(items) = value else {
        return Err(CatalogError::validation("ids must be an array"));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .and_then(|raw| QuestionId::parse(raw).ok())
                .ok_or_else(|| {
                    CatalogError::validation(format!("ids[{}] must be a non-empty string", index))
                })
        })
        .collect()
}
