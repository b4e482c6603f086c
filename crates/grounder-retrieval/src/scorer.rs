//! Per-document relevance scoring.
//!
//! Case-insensitive substring containment is the only string relation used:
//! both sides are Unicode-lowercased, and `contains` does the rest. The
//! score is a sum of two bonus kinds:
//!
//! - a literal bonus when the document contains the whole query, and
//! - a topic bonus per synonym-table topic that the query mentions (by key
//!   or by any of its expansion words) and the document names (by key).
//!
//! Expansion words only widen what counts as "the query mentions the
//! topic"; they earn no bonus of their own when found in the document.

use grounder_corpus::SynonymTable;

/// Bonus for the document containing the full query text.
pub const LITERAL_WEIGHT: f32 = 10.0;

/// Bonus per topic mentioned by the query and named by the document.
pub const TOPIC_WEIGHT: f32 = 5.0;

/// Score one document against one query.
///
/// Pure and deterministic: reads only its arguments, so it is safe to call
/// from any number of tasks at once. Always returns a finite value >= 0.
///
/// The empty query is a substring of every document, so it earns the
/// literal bonus everywhere; the retriever's index tie-break then picks
/// document 0.
pub fn score(document: &str, query: &str, table: &SynonymTable) -> f32 {
    let doc = document.to_lowercase();
    let query = query.to_lowercase();

    let mut total = 0.0;

    if doc.contains(&query) {
        total += LITERAL_WEIGHT;
    }

    for (topic, expansions) in table.iter() {
        let topic_in_query =
            query.contains(topic) || expansions.iter().any(|w| query.contains(w.as_str()));
        if topic_in_query && doc.contains(topic) {
            total += TOPIC_WEIGHT;
        }
    }

    total
}
