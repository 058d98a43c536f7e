//! LLM provider trait and request/response types.

use crate::error::PipelineError;
use crate::types::Taxonomy;
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type, always "image/jpeg" for transport copies
    pub media_type: String,
}

impl ImageInput {
    /// Wrap already-encoded JPEG bytes.
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: "image/jpeg".to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A single-label classification request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The image to classify
    pub image: ImageInput,
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl LlmRequest {
    /// Build a classification request offering every label in `taxonomy`.
    pub fn classify_image(image: ImageInput, taxonomy: &Taxonomy, max_tokens: u32) -> Self {
        Self {
            image,
            prompt: classification_prompt(taxonomy),
            max_tokens,
        }
    }
}

/// The fixed classification prompt with the taxonomy spliced in.
pub fn classification_prompt(taxonomy: &Taxonomy) -> String {
    format!(
        "You are an expert in image classification. You are given an image and you need \
         to classify it into one of the following categories: {}. Please classify the \
         image below and return only the chosen classification as a single word.",
        taxonomy.joined()
    )
}

/// The response from a classification call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// First choice's message text, untrimmed; `None` when the service sent `null`
    pub text: Option<String>,
    /// Refusal message from the first choice, if the model declined
    pub refusal: Option<String>,
    /// Model identifier reported by the service, if any
    pub model: Option<String>,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
    /// Entire parsed response body, in the order the service sent it
    pub body: serde_json::Value,
}

/// Trait that all LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Send one request and return the parsed response.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, PipelineError>;

    /// Per-request timeout, if one is configured.
    fn timeout(&self) -> Option<Duration>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_from_jpeg() {
        let input = ImageInput::from_jpeg(&[0xFF, 0xD8, 0xFF]);
        assert_eq!(input.media_type, "image/jpeg");
        assert_eq!(input.data, "/9j/");
    }

    #[test]
    fn test_image_input_data_url() {
        let input = ImageInput::from_jpeg(&[1, 2, 3]);
        assert_eq!(input.data_url(), "data:image/jpeg;base64,AQID");
    }

    #[test]
    fn test_prompt_lists_taxonomy_in_order() {
        let prompt = classification_prompt(&Taxonomy::new(["A", "B"]));
        assert!(prompt.contains("A, B"));
        assert!(prompt.starts_with("You are an expert in image classification."));
        assert!(prompt.contains("following categories: A, B. Please classify"));
        assert!(prompt.ends_with("as a single word."));
    }

    #[test]
    fn test_classify_request_carries_max_tokens() {
        let image = ImageInput::from_jpeg(&[1, 2, 3]);
        let request = LlmRequest::classify_image(image, &Taxonomy::new(["Architecture"]), 300);
        assert_eq!(request.max_tokens, 300);
        assert!(request.prompt.contains("categories: Architecture."));
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }
}
