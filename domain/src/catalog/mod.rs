//! Question catalog engine: pure parts.
//!
//! - [`filter`] - query attributes to store predicate
//! - [`aggregation`] - `(subject, examType)` grouping with distinct years
//! - [`outcome`] - per-request bulk mutation results

pub mod aggregation;
pub mod filter;
pub mod outcome;
