use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::services::ConversationRouter;
use crate::domain::entities::IncomingMessage;
use crate::domain::traits::Transport;

/// Health check command answered before routing
pub const PING_COMMAND: &str = "/ping";

/// Transport entry point: drops replayed messages and keeps router failures from escaping
pub struct MessageGateway {
    router: Arc<ConversationRouter>,
    transport: Arc<dyn Transport>,
    started_at: DateTime<Utc>,
}

impl MessageGateway {
    pub fn new(router: Arc<ConversationRouter>, transport: Arc<dyn Transport>) -> Self {
        Self {
            router,
            transport,
            started_at: Utc::now(),
        }
    }

    /// Messages older than this are ignored
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Handle one delivered message. Errors are logged, never returned.
    pub async fn handle(&self, message: IncomingMessage) {
        if message.timestamp < self.started_at {
            tracing::debug!("Skipping message {} sent before startup", message.id);
            return;
        }

        if message.text.starts_with(PING_COMMAND) {
            if let Err(e) = self.transport.say(&message.reply_target(), "pong").await {
                tracing::error!("Failed to answer ping: {}", e);
            }
            return;
        }

        if let Err(e) = self.router.on_message(&message).await {
            tracing::error!("Failed to handle message {} from {}: {}", message.id, message.sender, e);
        }
    }
}
