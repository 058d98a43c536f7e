//! Single-label classification of one image.
//!
//! ```text
//! image → encode (300×300 JPEG, base64) → prompt + POST → label + sidecar
//! ```
//!
//! Every per-image problem ends up in [`ClassificationOutcome::Failed`] and
//! nothing is retried. The sidecar is written whenever the service returned
//! a first choice, even one whose content is `null` (a refusal); in that
//! case the image is still reported as failed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{ConfigError, PipelineError, PipelineResult};
use crate::llm::{ImageInput, LlmProvider, LlmRequest, OpenAiProvider};
use crate::pipeline::ImageEncoder;
use crate::sidecar;
use crate::types::{Classification, ClassificationOutcome, Taxonomy};

/// Classifies images against a taxonomy and persists the raw response.
pub struct Classifier {
    encoder: ImageEncoder,
    provider: Arc<dyn LlmProvider>,
    taxonomy: Taxonomy,
    max_tokens: u32,
}

impl Classifier {
    /// Create a classifier around an explicit provider.
    pub fn new(config: &Config, provider: Box<dyn LlmProvider>) -> Self {
        Self {
            encoder: ImageEncoder::new(&config.encode),
            provider: Arc::from(provider),
            taxonomy: Taxonomy::new(config.taxonomy.categories.iter().cloned()),
            max_tokens: config.llm.max_tokens,
        }
    }

    /// Create a classifier backed by the configured chat-completions endpoint.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] when `llm.api_key` does not
    /// resolve to a non-empty value.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.api_key()?;
        let provider = OpenAiProvider::from_config(&config.llm, &api_key);
        tracing::debug!(
            "Using {} model {} at {}",
            provider.name(),
            provider.model(),
            provider.endpoint()
        );
        Ok(Self::new(config, Box::new(provider)))
    }

    /// The taxonomy used by [`classify_image`](Self::classify_image).
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Classify `path` against the configured taxonomy.
    pub async fn classify_image(&self, path: &Path) -> ClassificationOutcome {
        self.classify(path, &self.taxonomy).await
    }

    /// Classify `path` against `taxonomy`.
    ///
    /// Never returns an error: failures are logged and reported as
    /// [`ClassificationOutcome::Failed`].
    pub async fn classify(&self, path: &Path, taxonomy: &Taxonomy) -> ClassificationOutcome {
        match self.try_classify(path, taxonomy).await {
            Ok(classification) => ClassificationOutcome::Classified(classification),
            Err(e) => {
                tracing::error!("Failed to classify image {}: {e}", path.display());
                ClassificationOutcome::Failed {
                    image: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_classify(
        &self,
        path: &Path,
        taxonomy: &Taxonomy,
    ) -> PipelineResult<Classification> {
        let image = self.encode(path).await?;
        let request = LlmRequest::classify_image(image, taxonomy, self.max_tokens);

        let response = self.provider.generate(&request).await?;
        let sidecar = sidecar::write_sidecar(path, &response.body)?;

        let Some(label) = response.text else {
            let mut message = "no message content in the first choice".to_string();
            if let Some(refusal) = response.refusal {
                message.push_str(&format!(" (refusal: {refusal})"));
            }
            return Err(PipelineError::Llm {
                message,
                status_code: None,
            });
        };

        if !taxonomy.contains(&label) {
            // Passed through unchanged; the model may answer outside the taxonomy.
            tracing::warn!(
                "Label {label:?} for {} is not one of: {}",
                path.display(),
                taxonomy.joined()
            );
        }

        tracing::debug!(
            path = %path.display(),
            latency_ms = response.latency_ms,
            tokens = ?response.tokens_used,
            "Classified as {label}"
        );

        Ok(Classification {
            image: path.to_path_buf(),
            label,
            model: response.model,
            tokens_used: response.tokens_used,
            latency_ms: response.latency_ms,
            sidecar,
        })
    }

    /// Run the blocking encoder off the async runtime.
    async fn encode(&self, path: &Path) -> PipelineResult<ImageInput> {
        let encoder = self.encoder.clone();
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || encoder.encode(&owned))
            .await
            .map_err(|e| PipelineError::Encode {
                path: path.to_path_buf(),
                message: format!("Task join error: {e}"),
            })?
    }
}
