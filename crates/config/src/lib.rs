//! Configuration for the desknotify daemon.
//!
//! The daemon reads a single `config.json` next to its executable:
//!
//! ```json
//! { "host": "0.0.0.0", "port": 8081 }
//! ```
//!
//! Loading never fails. Any problem with the file (missing, malformed,
//! wrong types, unusable values) is logged and the full default
//! configuration is used instead. Fields are never defaulted one by one.

mod config;
mod paths;

pub use config::{Config, DEFAULT_HOST, DEFAULT_PORT};
pub use paths::{CONFIG_FILE_NAME, asset_path, config_path, install_dir};

/// Reasons a configuration file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
