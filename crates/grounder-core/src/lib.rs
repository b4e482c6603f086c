//! # Grounder Core
//!
//! Shared foundation for the grounder workspace: the configuration system,
//! the error taxonomy, and the `CompletionBackend` trait that decouples the
//! answering engine from the outbound completion client.

pub mod config;
pub mod error;
pub mod traits;

pub use config::GrounderConfig;
pub use error::{GrounderError, Result};
pub use traits::CompletionBackend;
