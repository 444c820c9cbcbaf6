//! Configuration file loading for question-catalog
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CATALOG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./catalog.toml` or `./.catalog.toml`
//! 4. Global: `$XDG_CONFIG_HOME/question-catalog/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnalyticsConfig, FileConfig, FileEngineConfig, FileLoggingConfig, FileServerConfig,
    FileStoreConfig,
};
pub use loader::ConfigLoader;
