//! Server configuration from TOML (`[server]` section)

use catalog_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// address = "0.0.0.0:5000"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address the HTTP API listens on
    pub address: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
        }
    }
}

impl FileServerConfig {
    /// Parse the listen address, returning an error issue on failure.
    pub fn parse_address(&self) -> (Option<SocketAddr>, Vec<ConfigIssue>) {
        match self.address.trim().parse::<SocketAddr>() {
            Ok(addr) => (Some(addr), vec![]),
            Err(e) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::InvalidValue {
                        field: "server.address".to_string(),
                    },
                    format!("server.address: '{}' is not a socket address ({})", self.address, e),
                );
                (None, vec![issue])
            }
        }
    }
}
