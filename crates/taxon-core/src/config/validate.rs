//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encode.size == 0 {
            return Err(ConfigError::ValidationError(
                "encode.size must be > 0".into(),
            ));
        }
        if self.encode.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "encode.supported_formats must not be empty".into(),
            ));
        }
        if self.taxonomy.categories.is_empty() {
            return Err(ConfigError::ValidationError(
                "taxonomy.categories must not be empty".into(),
            ));
        }
        if self.taxonomy.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "taxonomy.categories must not contain blank labels".into(),
            ));
        }
        if self.llm.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.endpoint must not be empty".into(),
            ));
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.model must not be empty".into(),
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "llm.max_tokens must be > 0".into(),
            ));
        }
        if self.llm.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "llm.timeout_ms must be > 0 when set".into(),
            ));
        }
        Ok(())
    }
}
