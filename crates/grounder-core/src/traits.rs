//! Trait seams between grounder crates.

use async_trait::async_trait;

use crate::error::Result;

/// An outbound chat-completion backend.
///
/// The engine holds this as a trait object so tests can substitute a mock
/// without touching the network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name for logs and the info endpoint.
    fn name(&self) -> &str;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Send one user prompt and return the model's textual reply.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
