//! # Grounder Corpus
//!
//! The read-only data the retriever searches over: a line-per-document text
//! corpus loaded from a directory, and a topic → expansion-word synonym
//! table loaded from JSON. Both are built once at startup and shared
//! immutably (`Arc`) across concurrent scoring tasks; refreshing either
//! means restarting the process.

pub mod document;
pub mod synonyms;

pub use document::{Corpus, Document};
pub use synonyms::SynonymTable;
