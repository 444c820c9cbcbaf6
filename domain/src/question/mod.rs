//! Question domain.
//!
//! - [`entities::Question`] - a stored catalog question
//! - [`draft::QuestionDraft`] - an unvalidated submission
//! - [`patch::QuestionPatch`] - one item of a bulk update

pub mod draft;
pub mod entities;
pub mod patch;
pub mod value_objects;
