//! CLI configuration — defaults, `~/.cratewise/config.toml`, environment.

use std::env;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cratewise_core::types::{LinkShape, UnknownLinkShape};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommender::{OverlapPolicy, UnknownOverlapPolicy};

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors in configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting has a value that cannot be used.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Environment variable or config key.
        key: String,
        /// Why the value was refused.
        reason: String,
    },
}

/// Effective CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the recommendation backend.
    pub backend_url: String,
    /// Which link fields the backend supplies.
    pub link_shape: LinkShape,
    /// What to do with a submission made while another is in flight.
    pub on_overlap: OverlapPolicy,
    /// Request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            link_shape: LinkShape::default(),
            on_overlap: OverlapPolicy::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CliConfig {
    /// Override settings from `CRATEWISE_*` variables resolved by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CRATEWISE_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(shape) = lookup("CRATEWISE_LINK_SHAPE") {
            self.link_shape = shape
                .parse()
                .map_err(|e: UnknownLinkShape| invalid("CRATEWISE_LINK_SHAPE", e))?;
        }
        if let Some(policy) = lookup("CRATEWISE_ON_OVERLAP") {
            self.on_overlap = policy
                .parse()
                .map_err(|e: UnknownOverlapPolicy| invalid("CRATEWISE_ON_OVERLAP", e))?;
        }
        if let Some(secs) = lookup("CRATEWISE_TIMEOUT_SECS") {
            self.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|e: ParseIntError| invalid("CRATEWISE_TIMEOUT_SECS", e))?;
        }
        Ok(())
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `backend_url` is not an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "backend_url",
                format!("'{url}' must start with http:// or https://"),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_owned(),
        reason: reason.to_string(),
    }
}

/// Return the config file path: `CRATEWISE_CONFIG`, else `~/.cratewise/config.toml`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var("CRATEWISE_CONFIG") {
        return PathBuf::from(path);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_owned());
    PathBuf::from(home).join(".cratewise").join("config.toml")
}

/// Write `cfg` to `path`, creating parent directories if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn save_config(cfg: &CliConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(cfg)?)?;
    Ok(())
}

/// Load and deserialize a [`CliConfig`] from `path`; missing keys take defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialized.
pub fn load_config(path: &Path) -> Result<CliConfig> {
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Build the effective configuration: defaults, then the file at `path` if it
/// exists, then the variables `lookup` resolves, then `backend_override`.
///
/// # Errors
///
/// Returns an error if the file is unreadable or any value is invalid.
pub fn resolve_config<F>(path: &Path, backend_override: Option<&str>, lookup: F) -> Result<CliConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = if path.exists() {
        load_config(path).with_context(|| format!("failed to load {}", path.display()))?
    } else {
        CliConfig::default()
    };
    cfg.apply_env(lookup)?;
    if let Some(url) = backend_override {
        url.clone_into(&mut cfg.backend_url);
    }
    cfg.validate()?;
    Ok(cfg)
}
