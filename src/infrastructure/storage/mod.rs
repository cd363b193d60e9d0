//! In-memory conversation history

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::ChatMessage;
use crate::domain::traits::HistoryStore;

/// History and prompt override for one identity
#[derive(Debug, Clone, Default)]
struct Conversation {
    prompt: Option<String>,
    messages: Vec<ChatMessage>,
}

/// History store that lives for the process lifetime
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    conversations: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn push(&self, identity: &str, message: ChatMessage) {
        let mut conversations = self.conversations.write().await;
        conversations
            .entry(identity.to_string())
            .or_default()
            .messages
            .push(message);
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn prompt(&self, identity: &str) -> Option<String> {
        let conversations = self.conversations.read().await;
        conversations.get(identity).and_then(|c| c.prompt.clone())
    }

    async fn set_prompt(&self, identity: &str, prompt: &str) {
        let mut conversations = self.conversations.write().await;
        conversations.entry(identity.to_string()).or_default().prompt = Some(prompt.to_string());
    }

    async fn history(&self, identity: &str) -> Vec<ChatMessage> {
        let conversations = self.conversations.read().await;
        conversations
            .get(identity)
            .map(|c| c.messages.clone())
            .unwrap_or_default()
    }

    async fn append_user_message(&self, identity: &str, text: &str) {
        self.push(identity, ChatMessage::user(text)).await;
    }

    async fn append_assistant_message(&self, identity: &str, text: &str) {
        self.push(identity, ChatMessage::assistant(text)).await;
    }

    /// Drops the messages, keeps the prompt override
    async fn clear_history(&self, identity: &str) {
        let mut conversations = self.conversations.write().await;
        if let Some(conversation) = conversations.get_mut(identity) {
            conversation.messages.clear();
        }
    }
}
