use super::{Contact, Room, Target};
use chrono::{DateTime, Utc};

/// Kind of message delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Audio,
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Audio => "audio",
            MessageKind::Other(s) => s,
        }
    }

    /// Only text and voice messages are ever routed
    pub fn is_routable(&self) -> bool {
        matches!(self, MessageKind::Text | MessageKind::Audio)
    }
}

/// Represents an incoming message as the transport delivers it
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: String,
    pub sender: Contact,
    pub sender_is_self: bool,
    pub text: String,
    pub kind: MessageKind,
    pub room: Option<Room>,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(sender: Contact, text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            sender_is_self: false,
            text: text.into(),
            kind,
            room: None,
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(sender: Contact, text: impl Into<String>) -> Self {
        Self::new(sender, text, MessageKind::Text)
    }

    pub fn audio(sender: Contact) -> Self {
        Self::new(sender, "", MessageKind::Audio)
    }

    pub fn in_room(mut self, room: Room) -> Self {
        self.room = Some(room);
        self
    }

    pub fn from_self(mut self) -> Self {
        self.sender_is_self = true;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_private(&self) -> bool {
        self.room.is_none()
    }

    /// Where replies to this message go: the room for group chat, the sender otherwise
    pub fn reply_target(&self) -> Target {
        match &self.room {
            Some(room) => Target::Room(room.clone()),
            None => Target::Contact(self.sender.clone()),
        }
    }
}
