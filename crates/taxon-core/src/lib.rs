//! Taxon Core - single-label image classification with a vision model.
//!
//! Taxon walks a directory of images, asks a chat-completions model to pick
//! one category from a fixed taxonomy for each image, and stores the raw
//! response in a JSON sidecar beside the image.
//!
//! # Architecture
//!
//! ```text
//! Discover → Encode (300×300 JPEG) → Prompt + POST → Label + <image>.json
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use taxon_core::{Classifier, Config, FileDiscovery};
//!
//! #[tokio::main]
//! async fn main() -> taxon_core::Result<()> {
//!     let config = Config::load()?;
//!     let classifier = Classifier::from_config(&config)?;
//!
//!     let discovery = FileDiscovery::new(config.source_dir(), &config.encode);
//!     for path in discovery.walk().take(1) {
//!         let outcome = classifier.classify_image(&path?).await;
//!         println!("{:?}", outcome.label());
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod sidecar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenient access
pub use classifier::Classifier;
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, TaxonError};
pub use pipeline::{FileDiscovery, ImageEncoder};
pub use types::{Classification, ClassificationOutcome, Taxonomy};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
