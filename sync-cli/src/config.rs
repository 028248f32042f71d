//! Configuration resolution for the mediasync binary.
//!
//! Precedence: `--endpoint` flag, then the config file, then built-in
//! defaults. Without `--config` the platform config directory is used and a
//! missing file is not an error.

use anyhow::{Context, Result};
use mediasync_client::ClientConfig;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "mediasync.toml";

/// Resolve the client configuration.
pub fn load(path: Option<&Path>, endpoint: Option<&str>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let path = default_config_path()?;
            ClientConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
    };

    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint.to_string();
        config.validate().context("Invalid --endpoint")?;
    }
    Ok(config)
}

/// Get the default config file location.
fn default_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "mediasync", "mediasync")
        .context("Could not determine home directory")?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}
