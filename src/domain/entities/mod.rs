//! Domain entities - Core business objects with no external dependencies

pub mod contact;
pub mod message;
pub mod command;
pub mod conversation;
pub mod variant;

pub use contact::{Contact, Room, Target};
pub use message::{IncomingMessage, MessageKind};
pub use command::{Command, CommandRegistry};
pub use conversation::ChatMessage;
pub use variant::BotVariant;
