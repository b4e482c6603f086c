//! # Grounder Providers
//!
//! The outbound side of the service: an OpenAI-compatible chat-completion
//! client. Everything that follows the `{model, messages} → choices` wire
//! format (DeepSeek, OpenAI, Ollama, llama.cpp, ...) is reachable by
//! pointing `[llm] endpoint` at it.

pub mod chat_completion;

pub use chat_completion::{ChatCompletionClient, NO_REPLY_SENTINEL};

use grounder_core::config::LlmConfig;
use grounder_core::error::Result;
use grounder_core::traits::CompletionBackend;

/// Build the completion backend from configuration.
pub fn create_backend(config: &LlmConfig) -> Result<Box<dyn CompletionBackend>> {
    Ok(Box::new(ChatCompletionClient::from_config(config)?))
}
