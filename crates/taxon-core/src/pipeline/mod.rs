//! Image pipeline stages.
//!
//! - **discovery**: Find image files in directories
//! - **encode**: Stretch to a fixed square and re-encode as base64 JPEG

pub mod discovery;
pub mod encode;

// Re-exports for convenient access
pub use discovery::FileDiscovery;
pub use encode::ImageEncoder;
