//! Topic → expansion-word synonym table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use grounder_core::error::{GrounderError, Result};

/// On-disk shape: `{"synonyms": {"topic": ["word", ...], ...}}`.
#[derive(Debug, Deserialize)]
struct SynonymFile {
    synonyms: BTreeMap<String, Vec<String>>,
}

/// A read-only mapping from topic keys to expansion words.
///
/// Keys and words are case-folded at construction so scoring never has to
/// normalize them again. Backed by a `BTreeMap`, so iteration order is
/// deterministic (scores are order-independent sums, but determinism costs
/// nothing here). Shared immutably across concurrent scoring tasks.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    topics: BTreeMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Build a table from (topic, expansion-words) pairs. Duplicate topic
    /// keys keep the last entry; an empty expansion list is allowed and
    /// simply contributes nothing beyond the key itself.
    pub fn from_entries<K, W, I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, E)>,
        E: IntoIterator<Item = W>,
        K: AsRef<str>,
        W: AsRef<str>,
    {
        let topics = entries
            .into_iter()
            .map(|(k, words)| {
                (
                    k.as_ref().to_lowercase(),
                    words
                        .into_iter()
                        .map(|w| w.as_ref().to_lowercase())
                        .collect(),
                )
            })
            .collect();
        Self { topics }
    }

    /// Load the table from a JSON file. Any failure is fatal: a service
    /// running with a silently empty table would answer queries with the
    /// wrong context.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GrounderError::SynonymLoad(format!("Cannot read {}: {e}", path.display()))
        })?;
        let file: SynonymFile = serde_json::from_str(&content).map_err(|e| {
            GrounderError::SynonymLoad(format!("Cannot parse {}: {e}", path.display()))
        })?;
        Ok(Self::from_entries(file.synonyms))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Iterate (topic, expansion words) in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.topics.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
