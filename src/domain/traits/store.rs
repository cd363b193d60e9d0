use async_trait::async_trait;
use crate::domain::entities::ChatMessage;

/// Conversation history keyed by identity.
///
/// Writes are fire-and-forget: the store is assumed to always succeed.
/// Per-identity serialization, if any, is the store's business.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    // Prompt override
    async fn prompt(&self, identity: &str) -> Option<String>;
    async fn set_prompt(&self, identity: &str, prompt: &str);

    // Message history
    async fn history(&self, identity: &str) -> Vec<ChatMessage>;
    async fn append_user_message(&self, identity: &str, text: &str);
    async fn append_assistant_message(&self, identity: &str, text: &str);
    async fn clear_history(&self, identity: &str);
}
