//! Conversation router - turns one incoming message into outbound actions

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::errors::{BotError, ConfigError};
use crate::application::messaging::{
    strip_bootstrap, NonsenseFilter, ReplyChunker, TextNormalizer, TriggerConfig, TriggerEvaluator,
};
use crate::application::services::command_service::{CommandContext, CommandDispatcher};
use crate::domain::entities::{BotVariant, Contact, IncomingMessage, MessageKind, Target};
use crate::domain::traits::{CompletionBackend, HistoryStore, ImageGenerator, Transcriber, Transport};

/// Any message containing this asks for an image
pub const IMAGE_MARKER: &str = "画";

/// Prefix put in front of a transcript when it is echoed back
pub const AUDIO_FRAME: &str = "您的问题是：";

/// Length of [`AUDIO_FRAME`] in characters, stripped again before cleaning
pub const AUDIO_FRAME_LEN: usize = 6;

/// Reply used when the completion backend has nothing to say
pub const EMPTY_REPLY_APOLOGY: &str = "Sorry, please try again later. 😔";

/// Reply used when a voice message cannot be transcribed
pub const AUDIO_APOLOGY: &str = "抱歉，我不是很明白。";

/// Marker the customer service persona emits once intake is complete
pub const JOY_SENTINEL: &str = "[Joyful]";

/// Follow-up prompt asking for the collected intake
pub const RENTAL_SUMMARY_REQUEST: &str = "Only get all customer rental request info";

/// External collaborators the router drives
#[derive(Clone)]
pub struct Backends {
    pub transport: Arc<dyn Transport>,
    pub completion: Arc<dyn CompletionBackend>,
    pub transcriber: Arc<dyn Transcriber>,
    pub images: Arc<dyn ImageGenerator>,
    pub store: Arc<dyn HistoryStore>,
}

/// Routes each message to a command, an image request or a conversational turn
pub struct ConversationRouter {
    variant: BotVariant,
    config: Arc<TriggerConfig>,
    filter: NonsenseFilter,
    trigger: TriggerEvaluator,
    normalizer: TextNormalizer,
    commands: CommandDispatcher,
    chunker: ReplyChunker,
    backends: Backends,
    escalation_contact: Option<String>,
    audio_dir: PathBuf,
}

impl ConversationRouter {
    pub fn new(
        bot_name: &str,
        variant: BotVariant,
        config: Arc<TriggerConfig>,
        backends: Backends,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            variant,
            filter: NonsenseFilter::new(config.clone()),
            trigger: TriggerEvaluator::new(bot_name, config.clone())?,
            normalizer: TextNormalizer::new(bot_name, config.clone())?,
            commands: CommandDispatcher::with_defaults(),
            chunker: ReplyChunker::new(backends.transport.clone(), config.reply_block_words.clone()),
            config,
            backends,
            escalation_contact: None,
            audio_dir: PathBuf::from("./public"),
        })
    }

    /// Contact that receives collected intake in the customer service variant
    pub fn with_escalation_contact(mut self, name: Option<String>) -> Self {
        self.escalation_contact = name.filter(|n| !n.is_empty());
        self
    }

    /// Directory voice attachments are saved to before transcription
    pub fn with_audio_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.audio_dir = dir.into();
        self
    }

    pub fn variant(&self) -> BotVariant {
        self.variant
    }

    pub fn commands(&self) -> &CommandDispatcher {
        &self.commands
    }

    /// Process one message end to end.
    ///
    /// Backend and transport failures are returned to the caller; nothing is retried.
    pub async fn on_message(&self, message: &IncomingMessage) -> Result<(), BotError> {
        let private_chat = message.is_private();
        let identity = match &message.room {
            None => {
                tracing::info!("Contact: {} Text: {}", message.sender.name, message.text);
                message.sender.name.clone()
            }
            Some(room) => {
                let topic = self.backends.transport.room_topic(room).await?;
                tracing::info!("Room: {} Contact: {} Text: {}", topic, message.sender.name, message.text);
                topic
            }
        };

        if self.filter.is_nonsense(message, self.variant) {
            return Ok(());
        }

        let target = message.reply_target();
        let mut raw_text = message.text.clone();

        if message.kind == MessageKind::Audio {
            match self.transcribe(message, &identity).await {
                Some(framed) => {
                    self.backends.transport.say(&target, &framed).await?;
                    raw_text = framed;
                }
                None => {
                    return self.chunker.send(&target, AUDIO_APOLOGY).await;
                }
            }
        }

        if let Some(line) = strip_bootstrap(&raw_text) {
            tracing::info!("Command: {}", raw_text);
            let ctx = CommandContext {
                identity: &identity,
                target: &target,
                chunker: &self.chunker,
                store: self.backends.store.as_ref(),
            };
            return self.commands.dispatch(&ctx, line).await;
        }

        if raw_text.contains(IMAGE_MARKER) {
            tracing::info!("Image: {}", raw_text);
            let url = self.backends.images.generate_image(&identity, &raw_text).await?;
            return self.backends.transport.send_image(&target, &url).await;
        }

        if !self.trigger.should_trigger(&raw_text, private_chat) {
            return Ok(());
        }

        let text = if message.kind == MessageKind::Audio {
            skip_chars(&raw_text, AUDIO_FRAME_LEN)
        } else {
            &raw_text
        };
        let text = self.normalizer.clean(text, private_chat);

        if private_chat {
            self.on_private_message(&message.sender, &identity, &text).await
        } else if self.config.disable_group_message {
            Ok(())
        } else {
            self.on_group_message(&message.sender, &target, &identity, &text).await
        }
    }

    /// Save and transcribe a voice message. `None` means the caller should apologise.
    async fn transcribe(&self, message: &IncomingMessage, identity: &str) -> Option<String> {
        let path = match self.backends.transport.save_audio(message, &self.audio_dir).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Failed to save voice message from {}: {}", identity, e);
                return None;
            }
        };

        match self.backends.transcriber.transcribe(identity, &path).await {
            Ok(text) => {
                tracing::info!("Transcribed voice message: {}", text);
                Some(format!("{}{}", AUDIO_FRAME, text))
            }
            Err(e) => {
                tracing::warn!("Transcription failed for {}: {}", identity, e);
                None
            }
        }
    }

    /// Ask the backend for a reply and record it. Empty replies become an apology that is not recorded.
    async fn fetch_reply(&self, identity: &str, text: &str) -> Result<String, BotError> {
        let reply = self.backends.completion.complete(identity, text, self.variant).await?;
        if reply.is_empty() {
            return Ok(EMPTY_REPLY_APOLOGY.to_string());
        }
        self.backends.store.append_assistant_message(identity, &reply).await;
        Ok(reply)
    }

    async fn on_private_message(&self, talker: &Contact, identity: &str, text: &str) -> Result<(), BotError> {
        let reply = self.fetch_reply(identity, text).await?;

        match self.variant {
            BotVariant::Default => {}
            BotVariant::CustomerService => {
                if reply.contains(JOY_SENTINEL) {
                    self.escalate(talker, identity).await?;
                }
            }
        }

        self.chunker.send(&Target::Contact(talker.clone()), &reply).await
    }

    /// Forward the collected intake for `talker` to the escalation contact
    async fn escalate(&self, talker: &Contact, identity: &str) -> Result<(), BotError> {
        let Some(name) = self.escalation_contact.as_deref() else {
            tracing::debug!("No escalation contact configured");
            return Ok(());
        };
        let Some(contact) = self.backends.transport.find_contact(name).await? else {
            tracing::warn!("Escalation contact {} not found", name);
            return Ok(());
        };

        let info = self.fetch_reply(identity, RENTAL_SUMMARY_REQUEST).await?;
        let summary = format!("Collected all rental info from {}: {}", talker.name, info);
        tracing::info!("{}", summary);
        self.chunker.send(&Target::Contact(contact), &summary).await
    }

    async fn on_group_message(
        &self,
        talker: &Contact,
        room: &Target,
        topic: &str,
        text: &str,
    ) -> Result<(), BotError> {
        let reply = self.fetch_reply(topic, text).await?;
        let result = format!("@{} {}\n\n------\n {}", talker.name, text, reply);
        self.chunker.send(room, &result).await
    }
}

/// Drop the first `n` characters of `text`
fn skip_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((i, _)) => &text[i..],
        None => "",
    }
}
