//! Reply chunker - splits outbound replies to the transport's size limit

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::Target;
use crate::domain::traits::Transport;

/// Maximum length of a single outbound message, in characters
pub const SINGLE_MESSAGE_MAX_SIZE: usize = 500;

/// Sent ahead of a reply that contains an output block word
pub const BLOCKED_REPLY_APOLOGY: &str = "抱歉，回答无法正常显示，请换一种提问方式";

/// Split `message` into ordered segments of at most `max` characters.
///
/// Every segment but the last is exactly `max` long. An empty message
/// yields a single empty segment.
pub fn split_reply(message: &str, max: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = message;
    while rest.chars().count() > max {
        let cut = rest.char_indices().nth(max).map(|(i, _)| i).unwrap_or(rest.len());
        segments.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    segments.push(rest.to_string());
    segments
}

/// Sends replies through the transport in transport-safe segments
pub struct ReplyChunker {
    transport: Arc<dyn Transport>,
    reply_block_words: Vec<String>,
}

impl ReplyChunker {
    pub fn new(transport: Arc<dyn Transport>, reply_block_words: Vec<String>) -> Self {
        Self {
            transport,
            reply_block_words,
        }
    }

    /// Whether the reply contains a configured output block word
    pub fn is_blocked(&self, message: &str) -> bool {
        self.reply_block_words.iter().any(|word| message.contains(word.as_str()))
    }

    /// Send `message` to `target`, one segment at a time.
    ///
    /// A blocked reply gets the apology first and is then still sent in full.
    pub async fn send(&self, target: &Target, message: &str) -> Result<(), BotError> {
        if self.is_blocked(message) {
            tracing::warn!("Blocked reply: {}", message);
            self.transport.say(target, BLOCKED_REPLY_APOLOGY).await?;
        }
        for segment in split_reply(message, SINGLE_MESSAGE_MAX_SIZE) {
            self.transport.say(target, &segment).await?;
        }
        Ok(())
    }
}
