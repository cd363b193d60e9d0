//! Message handling - classification, addressing and outbound chunking

pub mod chunker;
pub mod filter;
pub mod normalizer;
pub mod parser;
pub mod trigger;

pub use chunker::ReplyChunker;
pub use filter::NonsenseFilter;
pub use normalizer::TextNormalizer;
pub use parser::{parse_command, strip_bootstrap, ParsedCommand};
pub use trigger::{TriggerConfig, TriggerEvaluator};
