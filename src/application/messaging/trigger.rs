//! Trigger rules - decides whether a message should reach the completion backend

use regex::Regex;
use std::sync::Arc;

use crate::application::errors::ConfigError;

/// Immutable trigger and blocklist configuration, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct TriggerConfig {
    /// Keyword stripped from private messages when no trigger rule is set
    pub private_trigger_keyword: Option<String>,
    /// General trigger pattern, takes precedence over the keyword
    pub trigger_rule: Option<Regex>,
    pub disable_group_message: bool,
    /// Incoming messages containing any of these are ignored
    pub block_words: Vec<String>,
    /// Replies containing any of these are preceded by an apology
    pub reply_block_words: Vec<String>,
}

impl TriggerConfig {
    /// Pattern removed from private messages before they are sent to the backend
    pub fn private_trigger_rule(&self) -> Result<Option<Regex>, ConfigError> {
        if let Some(rule) = &self.trigger_rule {
            return Ok(Some(rule.clone()));
        }
        match self.private_trigger_keyword.as_deref() {
            Some(keyword) if !keyword.is_empty() => compile(&regex::escape(keyword)).map(Some),
            _ => Ok(None),
        }
    }
}

/// `^@<botName>\s`, the group chat mention prefix
pub fn mention_pattern(bot_name: &str) -> Result<Regex, ConfigError> {
    compile(&format!(r"^@{}\s", regex::escape(bot_name)))
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern)
        .map_err(|e| ConfigError::InvalidValue(format!("invalid pattern {:?}: {}", pattern, e)))
}

/// Decides whether a message is addressed to the bot
pub struct TriggerEvaluator {
    mention: Regex,
    config: Arc<TriggerConfig>,
}

impl TriggerEvaluator {
    pub fn new(bot_name: &str, config: Arc<TriggerConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            mention: mention_pattern(bot_name)?,
            config,
        })
    }

    /// Private chat always triggers. The keyword and rule only affect cleaning.
    /// Group chat needs the mention prefix, plus the trigger rule on the rest if one is set.
    pub fn should_trigger(&self, text: &str, private_chat: bool) -> bool {
        let triggered = if private_chat {
            true
        } else if self.mention.is_match(text) {
            match &self.config.trigger_rule {
                Some(rule) => rule.is_match(&self.mention.replace(text, "")),
                None => true,
            }
        } else {
            false
        };

        if triggered {
            tracing::info!("Triggered completion: {}", text);
        }
        triggered
    }
}
