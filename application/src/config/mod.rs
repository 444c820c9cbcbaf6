//! Application-level configuration.
//!
//! - [`EngineParams`] - bulk write concurrency and submit validation policy

pub mod engine_params;

pub use engine_params::EngineParams;
