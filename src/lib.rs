//! ginkgo-bot - routes chat messages to an AI completion backend
//!
//! Decides per message whether it is noise, a command, an image request or a
//! conversational turn, and whether it is addressed to the bot at all.

pub mod domain;
pub mod application;
pub mod infrastructure;
