//! Application services - Business logic orchestration

pub mod command_service;
pub mod router;
pub mod gateway;

pub use command_service::{CommandAction, CommandContext, CommandDispatcher};
pub use router::{Backends, ConversationRouter};
pub use gateway::MessageGateway;
