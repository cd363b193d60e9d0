use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::application::errors::BotError;
use crate::domain::entities::{Contact, IncomingMessage, Room, Target};

/// Transport trait - abstraction over the messaging platform
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a text message to a contact or room
    async fn say(&self, target: &Target, text: &str) -> Result<(), BotError>;

    /// Send an image, given by URL, to a contact or room
    async fn send_image(&self, target: &Target, url: &str) -> Result<(), BotError>;

    /// Look up a contact by display name
    async fn find_contact(&self, name: &str) -> Result<Option<Contact>, BotError>;

    /// Resolve the topic of a room
    async fn room_topic(&self, room: &Room) -> Result<String, BotError>;

    /// Save the audio attachment of a voice message into `dir` and return its path
    async fn save_audio(&self, message: &IncomingMessage, dir: &Path) -> Result<PathBuf, BotError>;
}
