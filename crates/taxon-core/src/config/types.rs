//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory scanned for images when no input is given on the command line
    pub source_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("source"),
        }
    }
}

/// Taxonomy offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Ordered category labels
    pub categories: Vec<String>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                "Portrait/People".to_string(),
                "Landscape/Environment".to_string(),
                "Still Life/Object".to_string(),
                "Architecture".to_string(),
                "Abstract/Non-representational".to_string(),
            ],
        }
    }
}

/// Image discovery and transport encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Edge length of the square raster sent to the model
    pub size: u32,

    /// File extensions picked up by discovery (matched case-sensitively)
    pub supported_formats: Vec<String>,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            size: 300,
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

/// Chat-completions endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Full URL of the chat-completions endpoint
    pub endpoint: String,

    /// API key, or a `${ENV_VAR}` reference resolved at startup
    pub api_key: String,

    /// Multimodal model identifier
    pub model: String,

    /// Maximum output tokens per call
    pub max_tokens: u32,

    /// Per-request timeout in milliseconds. Unset means the HTTP client's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: "${OPENAI_KEY}".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 300,
            timeout_ms: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
