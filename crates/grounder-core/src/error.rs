//! Error types shared across the grounder workspace.

use thiserror::Error;

/// All errors produced by grounder crates.
#[derive(Debug, Error)]
pub enum GrounderError {
    /// Configuration file unreadable or malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// Corpus directory could not be loaded.
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    /// Synonym table file unreadable or malformed.
    #[error("Synonym load error: {0}")]
    SynonymLoad(String),

    /// HTTP transport failure talking to the completion endpoint.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The completion endpoint answered with an error or an unusable body.
    #[error("Provider error: {0}")]
    Provider(String),

    /// No API key available for a provider that requires one.
    #[error("API key missing for provider '{0}'")]
    ApiKeyMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GrounderError>;
