//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::application::messaging::trigger::{compile, TriggerConfig};
use crate::domain::entities::BotVariant;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub chat: ChatConfig,
    pub openai: OpenAIConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    /// Name members use to mention the bot in group chats
    pub name: String,
    pub variant: BotVariant,
    /// Display name of the contact that receives collected rental info
    pub escalation_contact: Option<String>,
}

/// Trigger rules and blocklists
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChatConfig {
    pub private_trigger_keyword: Option<String>,
    pub trigger_rule: Option<String>,
    pub disable_group_message: bool,
    pub block_words: Vec<String>,
    pub reply_block_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub image_model: String,
    pub image_size: String,
    pub transcription_model: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AudioConfig {
    pub directory: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Ginkgo Customer Service".to_string(),
            variant: BotVariant::CustomerService,
            escalation_contact: None,
        }
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.6,
            max_tokens: None,
            image_model: "dall-e-2".to_string(),
            image_size: "256x256".to_string(),
            transcription_model: "whisper-1".to_string(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./public"),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)
            .map_err(|e| ConfigError::Parse(format!("Failed to write config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = var("OPENAI_API_BASE") {
            self.openai.base_url = url;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.openai.model = model;
        }
        if let Some(name) = var("BOT_NAME") {
            self.bot.name = name;
        }
        if let Some(keyword) = var("CHAT_PRIVATE_TRIGGER_KEYWORD") {
            self.chat.private_trigger_keyword = Some(keyword);
        }
        if let Some(rule) = var("CHAT_TRIGGER_RULE") {
            self.chat.trigger_rule = Some(rule);
        }
        if let Some(flag) = var("DISABLE_GROUP_MESSAGE") {
            self.chat.disable_group_message = flag.trim().eq_ignore_ascii_case("true");
        }
        if let Some(words) = var("BLOCK_WORDS") {
            self.chat.block_words = split_list(&words);
        }
        if let Some(words) = var("CHATGPT_BLOCK_WORDS") {
            self.chat.reply_block_words = split_list(&words);
        }
    }

    /// Compile the immutable trigger configuration. Empty keyword and rule count as unset.
    pub fn trigger_config(&self) -> Result<TriggerConfig, ConfigError> {
        let trigger_rule = match self.chat.trigger_rule.as_deref() {
            Some(rule) if !rule.is_empty() => Some(compile(rule)?),
            _ => None,
        };

        Ok(TriggerConfig {
            private_trigger_keyword: self.chat.private_trigger_keyword.clone().filter(|k| !k.is_empty()),
            trigger_rule,
            disable_group_message: self.chat.disable_group_message,
            block_words: self.chat.block_words.clone(),
            reply_block_words: self.chat.reply_block_words.clone(),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
