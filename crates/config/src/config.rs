//! Configuration loading and validation.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;
use crate::paths::config_path;

/// Host used when no usable configuration is found.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when no usable configuration is found.
pub const DEFAULT_PORT: u16 = 8081;

/// Effective daemon configuration.
///
/// Both fields are required in the file. A missing key, a key of the wrong
/// type or an out-of-range port rejects the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Interface the HTTP server binds to.
    pub host: String,

    /// TCP port the HTTP server listens on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Loads `config.json` from the installation directory.
    ///
    /// Never fails: on any error the reason is logged and the default
    /// configuration is returned.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Loads configuration from `path`, falling back to the defaults on error.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), host = %config.host, port = config.port, "config loaded and validated");
                config
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "error loading config file: {e}");
                Self::default()
            }
        }
    }

    /// Reads and validates the configuration at `path`.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a configuration document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        // serde would also accept `["host", 8081]` for a struct.
        if !value.is_object() {
            return Err(ConfigError::Invalid("expected a JSON object".into()));
        }

        let config: Config = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns `host:port`, as shown in logs and the tray menu.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("'host' must not be empty".into()));
        }
        Ok(())
    }
}
