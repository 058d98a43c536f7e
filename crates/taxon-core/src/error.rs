//! Error types for the Taxon classification pipeline.
//!
//! Errors are organized by stage so messages carry the file path and the
//! specific problem. Only discovery errors are fatal to a run; everything
//! else is reported per image.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Taxon operations.
#[derive(Error, Debug)]
pub enum TaxonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The API key could not be resolved.
    ///
    /// `var` is the environment variable the config points at (or the raw
    /// config key when no `${VAR}` reference is used).
    #[error("API key not set. Set the {var} env var or llm.api_key in the config file.")]
    MissingApiKey { var: String },
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Directory traversal failed
    #[error("Discovery failed under {path}: {message}")]
    Discovery { path: PathBuf, message: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Re-encoding to JPEG failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Chat-completions call failed or returned an unusable body
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Writing the sidecar file failed
    #[error("Failed to write sidecar {path}: {message}")]
    Sidecar { path: PathBuf, message: String },
}

/// Convenience type alias for Taxon results.
pub type Result<T> = std::result::Result<T, TaxonError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
