//! LLM integration - OpenAI-compatible backends

pub mod traits;
pub mod completion;
pub mod providers;


pub use traits::{LLM, LLMResponse, LLMError, LLMResult, LLMUsage};
pub use completion::LlmCompletion;
pub use providers::OpenAIProvider;
