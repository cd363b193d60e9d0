//! Text normalizer - strips quoting separators and addressing syntax

use regex::Regex;
use std::sync::Arc;

use super::trigger::{mention_pattern, TriggerConfig};
use crate::application::errors::ConfigError;

/// Separator the transport inserts between quoted turns
pub const CONVERSATION_SEPARATOR: &str = "- - - - - - - - - - - - - - -";

/// Cleans raw message text before it is sent to the completion backend
pub struct TextNormalizer {
    mention: Regex,
    private_rule: Option<Regex>,
    config: Arc<TriggerConfig>,
}

impl TextNormalizer {
    pub fn new(bot_name: &str, config: Arc<TriggerConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            mention: mention_pattern(bot_name)?,
            private_rule: config.private_trigger_rule()?,
            config,
        })
    }

    /// Keep only the last quoted turn, then remove the first match of the
    /// addressing patterns. Whitespace is otherwise left alone.
    pub fn clean(&self, raw: &str, private_chat: bool) -> String {
        let text = raw.rsplit(CONVERSATION_SEPARATOR).next().unwrap_or(raw);

        if private_chat {
            match &self.private_rule {
                Some(rule) => rule.replace(text, "").into_owned(),
                None => text.to_string(),
            }
        } else {
            let text = self.mention.replace(text, "");
            match &self.config.trigger_rule {
                Some(rule) => rule.replace(&text, "").into_owned(),
                None => text.into_owned(),
            }
        }
    }
}
