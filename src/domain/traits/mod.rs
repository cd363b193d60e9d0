//! Domain traits - Abstractions for external collaborators

pub mod transport;
pub mod backend;
pub mod store;

pub use transport::Transport;
pub use backend::{CompletionBackend, ImageGenerator, Transcriber};
pub use store::HistoryStore;
