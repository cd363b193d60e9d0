//! Completion backend built on an LLM provider and the history store

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::BackendError;
use crate::domain::entities::{BotVariant, ChatMessage};
use crate::domain::traits::{CompletionBackend, HistoryStore};
use crate::infrastructure::llm::LLM;

/// Sends an identity's whole conversation to the provider on every turn
pub struct LlmCompletion {
    llm: Arc<dyn LLM>,
    store: Arc<dyn HistoryStore>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LlmCompletion {
    pub fn new(llm: Arc<dyn LLM>, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            llm,
            store,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// System prompt followed by the stored history
    async fn build_messages(&self, identity: &str, variant: BotVariant) -> Vec<ChatMessage> {
        let prompt = self
            .store
            .prompt(identity)
            .await
            .unwrap_or_else(|| variant.default_prompt().to_string());

        let mut messages = vec![ChatMessage::system(prompt)];
        messages.extend(self.store.history(identity).await);
        messages
    }
}

#[async_trait]
impl CompletionBackend for LlmCompletion {
    async fn complete(&self, identity: &str, text: &str, variant: BotVariant) -> Result<String, BackendError> {
        self.store.append_user_message(identity, text).await;
        let messages = self.build_messages(identity, variant).await;

        tracing::debug!("Requesting {} completion for {} with {} messages", self.llm.name(), identity, messages.len());
        let response = self
            .llm
            .chat(messages, None, self.temperature, self.max_tokens)
            .await?;

        if let Some(usage) = &response.usage {
            tracing::debug!("Token usage for {}: {}", identity, usage.total_tokens);
        }
        Ok(response.content.trim().to_string())
    }
}
