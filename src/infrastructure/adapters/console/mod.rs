//! Console adapter for development/testing

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::application::errors::BotError;
use crate::domain::entities::{Contact, IncomingMessage, Room, Target};
use crate::domain::traits::Transport;

/// Name of the contact every console line is sent from
pub const CONSOLE_CONTACT: &str = "console";

/// Console transport for local development.
///
/// A line is a private message from [`CONSOLE_CONTACT`]; `#<topic> <text>`
/// is a group message in room `<topic>`.
pub struct ConsoleAdapter {
    contact: Contact,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            contact: Contact::named(CONSOLE_CONTACT),
        }
    }

    /// Turn one input line into a message. Blank lines yield nothing.
    pub fn parse_line(&self, line: &str) -> Option<IncomingMessage> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let (topic, text) = rest.split_once(' ').unwrap_or((rest, ""));
            if !topic.is_empty() {
                return Some(IncomingMessage::from_text(self.contact.clone(), text).in_room(Room::new(topic)));
            }
        }
        Some(IncomingMessage::from_text(self.contact.clone(), line))
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ConsoleAdapter {
    async fn say(&self, target: &Target, text: &str) -> Result<(), BotError> {
        println!("[BOT -> {}] {}", target, text);
        Ok(())
    }

    async fn send_image(&self, target: &Target, url: &str) -> Result<(), BotError> {
        println!("[BOT -> {}] [image] {}", target, url);
        Ok(())
    }

    async fn find_contact(&self, name: &str) -> Result<Option<Contact>, BotError> {
        Ok(Some(Contact::named(name)))
    }

    async fn room_topic(&self, room: &Room) -> Result<String, BotError> {
        Ok(room.id.clone())
    }

    async fn save_audio(&self, _message: &IncomingMessage, _dir: &Path) -> Result<PathBuf, BotError> {
        Err(BotError::Transport("console has no audio attachments".to_string()))
    }
}
