//! Presentation layer for question-catalog
//!
//! This crate contains the CLI definition and the HTTP API that exposes the
//! catalog engine and usage analytics.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{AppState, router, serve};
