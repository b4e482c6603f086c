//! # Grounder Retrieval
//!
//! The scoring engine: a pure per-document scorer (literal substring match
//! plus synonym/topic expansion) and a concurrent fan-out retriever that
//! reduces all per-document scores to a single best match.

pub mod retriever;
pub mod scorer;

pub use retriever::{BestMatch, Retriever, SearchHit};
pub use scorer::{LITERAL_WEIGHT, TOPIC_WEIGHT, score};
