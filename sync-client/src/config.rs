//! Client configuration.
//!
//! Loaded from a TOML file; every field has a default, so an empty or missing
//! file yields a working configuration.
//!
//! ```toml
//! endpoint = "http://127.0.0.1:3000/api"
//! request_timeout_secs = 30
//! notification_secs = 3
//! log_capacity = 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend command endpoint (default: http://127.0.0.1:3000/api).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound for one command round trip in seconds (default: 30).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How long notifications stay visible in seconds (default: 3).
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    /// Maximum number of retained log entries (default: 500).
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

// Default value functions
fn default_endpoint() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_notification_secs() -> u64 {
    3
}

fn default_log_capacity() -> usize {
    500
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
            notification_secs: default_notification_secs(),
            log_capacity: default_log_capacity(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check values that would make the client unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.notification_secs == 0 {
            return Err(ConfigError::Invalid(
                "notification_secs must be greater than zero".to_string(),
            ));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid(
                "log_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Command timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Notification display time as a duration.
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
