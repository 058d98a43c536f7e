//! Configuration management for Taxon.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a missing file or a
//! partial file both work.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Taxon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Categories offered to the model
    pub taxonomy: TaxonomyConfig,

    /// Discovery and encoding settings
    pub encode: EncodeConfig,

    /// Chat-completions settings
    pub llm: LlmConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.taxon.taxon/config.toml
    /// - Linux: ~/.config/taxon/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\taxon\config\config.toml
    ///
    /// Falls back to ~/.taxon/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "taxon", "taxon")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".taxon").join("config.toml")
            })
    }

    /// Get the resolved source directory (with ~ expansion).
    pub fn source_dir(&self) -> PathBuf {
        let path_str = self.general.source_dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Resolve the API key, expanding a `${ENV_VAR}` reference.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        crate::llm::resolve_env_var(&self.llm.api_key).ok_or_else(|| {
            let raw = self.llm.api_key.as_str();
            let var = raw
                .strip_prefix("${")
                .and_then(|s| s.strip_suffix('}'))
                .unwrap_or("llm.api_key");
            ConfigError::MissingApiKey {
                var: var.to_string(),
            }
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
