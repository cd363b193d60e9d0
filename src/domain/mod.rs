//! Domain layer - Core business objects and collaborator contracts
//!
//! This layer contains:
//! - Entities: Core business objects (IncomingMessage, Contact, Command, BotVariant)
//! - Traits: Abstractions for the transport, the AI backends and the history store

pub mod entities;
pub mod traits;
