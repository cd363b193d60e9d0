//! Provider-facing chat interface

use async_trait::async_trait;
use thiserror::Error;

use crate::application::errors::BackendError;
use crate::domain::entities::ChatMessage;

/// One chat completion
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Assistant text, empty when the provider returned none
    pub content: String,
    pub model: String,
    pub usage: Option<LLMUsage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct LLMUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Failures raised by a provider before they reach the router
#[derive(Error, Debug)]
pub enum LLMError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited")]
    RateLimited,

    /// Non-2xx status or a response without usable content
    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<LLMError> for BackendError {
    fn from(e: LLMError) -> Self {
        match e {
            LLMError::MissingApiKey => BackendError::MissingApiKey,
            LLMError::Network(msg) => BackendError::Network(msg),
            LLMError::RateLimited => BackendError::RateLimited,
            LLMError::Api(msg) => BackendError::Api(msg),
            LLMError::Parse(msg) => BackendError::Parse(msg),
        }
    }
}

pub type LLMResult<T> = Result<T, LLMError>;

/// A chat completion provider. `model` falls back to the provider's configured
/// model when `None`; unset sampling options are left to the API defaults.
#[async_trait]
pub trait LLM: Send + Sync {
    fn name(&self) -> &str;

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse>;
}
