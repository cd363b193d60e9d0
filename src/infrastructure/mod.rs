//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: In-memory conversation history
//! - LLM: OpenAI-compatible completion, image and transcription backends
//! - Adapters: Transport integrations (console)

pub mod config;
pub mod storage;
pub mod llm;
pub mod adapters;
