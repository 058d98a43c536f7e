//! LLM integration for single-label image classification.
//!
//! Provides a provider abstraction and the OpenAI-compatible chat-completions
//! client used by [`Classifier`](crate::Classifier).

pub(crate) mod openai;
pub(crate) mod provider;

pub use openai::OpenAiProvider;
pub use provider::{
    classification_prompt, resolve_env_var, ImageInput, LlmProvider, LlmRequest, LlmResponse,
};
