use async_trait::async_trait;
use std::path::Path;

use crate::application::errors::BackendError;
use crate::domain::entities::BotVariant;

/// Produces a conversational reply for an identity.
///
/// An empty string is a valid "no answer" result, not an error.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, identity: &str, text: &str, variant: BotVariant) -> Result<String, BackendError>;
}

/// Speech-to-text backend
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, identity: &str, path: &Path) -> Result<String, BackendError>;
}

/// Image generation backend, returns the URL of the generated image
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, identity: &str, prompt: &str) -> Result<String, BackendError>;
}
