//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for question-catalog
#[derive(Parser, Debug)]
#[command(name = "question-catalog")]
#[command(author, version, about = "Exam question catalog service")]
#[command(long_about = r#"
Question Catalog serves a catalog of exam-style multiple-choice questions over HTTP.

Questions can be submitted one at a time or in bulk, read back filtered by
exam type, exam year and subject, summarized as subject/exam-type groups with
their distinct years, and updated or deleted in bulk.

Configuration is loaded from (in priority order):
1. CATALOG_<SECTION>__<KEY>   Environment variables
2. --config <path>            Explicit config file
3. ./catalog.toml             Project-level config
4. ~/.config/question-catalog/config.toml   Global config

Example:
  question-catalog
  question-catalog --address 0.0.0.0:8080 --data-file data/questions.json
  question-catalog --show-config
"#)]
pub struct Cli {
    /// Address to listen on (overrides server.address)
    #[arg(short, long, value_name = "ADDR")]
    pub address: Option<String>,

    /// JSON snapshot file for the question store (overrides store.data_file)
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default tracing filter for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
