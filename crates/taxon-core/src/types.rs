//! Core data types for the Taxon classification pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ordered list of category labels offered to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy(Vec<String>);

impl Taxonomy {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels joined with `", "` in their configured order.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    /// Whether `label` is one of the categories (exact, whitespace-trimmed).
    pub fn contains(&self, label: &str) -> bool {
        let label = label.trim();
        self.0.iter().any(|c| c == label)
    }
}

/// A successful classification of one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Source image
    pub image: PathBuf,

    /// First choice's message text, as returned by the model
    pub label: String,

    /// Model identifier reported in the response, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Total tokens reported in the response usage, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,

    /// Round-trip latency of the HTTP call in milliseconds
    pub latency_ms: u64,

    /// Where the raw response was written
    pub sidecar: PathBuf,
}

/// Result of attempting to classify one image.
///
/// Per-image failures are values, not errors: a run keeps going after a
/// `Failed` outcome and nothing is retried.
#[derive(Debug, Clone)]
pub enum ClassificationOutcome {
    Classified(Classification),
    Failed { image: PathBuf, reason: String },
}

impl ClassificationOutcome {
    pub fn image(&self) -> &std::path::Path {
        match self {
            Self::Classified(c) => &c.image,
            Self::Failed { image, .. } => image,
        }
    }

    /// The label, if the image was classified.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Classified(c) => Some(&c.label),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }
}
