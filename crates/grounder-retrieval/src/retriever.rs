//! Concurrent fan-out retrieval with deterministic reduction.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use grounder_corpus::{Corpus, Document, SynonymTable};

use crate::scorer;

/// Score for one document, produced by one scoring task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub index: usize,
    pub score: f32,
}

/// The reduction of one retrieval: the single best-scoring document, or
/// nothing when no document scored above zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub document: Option<Document>,
    pub index: Option<usize>,
    pub score: f32,
}

impl BestMatch {
    /// The defined no-match outcome: callers substitute fallback context.
    pub fn miss() -> Self {
        Self {
            document: None,
            index: None,
            score: 0.0,
        }
    }

    pub fn is_miss(&self) -> bool {
        self.document.is_none()
    }
}

/// Fans one query out over every corpus document and reduces to a
/// `BestMatch`.
///
/// One scoring task is spawned per document, gated by a semaphore so a
/// large corpus cannot flood the runtime. Corpus and synonym table are
/// shared read-only; the only synchronization is the join at the end.
/// Dropping the returned future aborts all in-flight tasks, so callers can
/// wrap `retrieve` in `tokio::time::timeout` to cancel mid-fan-out.
pub struct Retriever {
    corpus: Arc<Corpus>,
    table: Arc<SynonymTable>,
    limit: Arc<Semaphore>,
}

impl Retriever {
    /// `max_concurrency` bounds the number of scoring tasks running at
    /// once; it must be at least 1.
    pub fn new(corpus: Arc<Corpus>, table: Arc<SynonymTable>, max_concurrency: usize) -> Self {
        Self {
            corpus,
            table,
            limit: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn table(&self) -> &Arc<SynonymTable> {
        &self.table
    }

    /// Score every document against `query` and return the best match.
    ///
    /// Ties are broken deterministically: highest score first, lowest
    /// corpus index second. Re-running with the same inputs always yields
    /// the same result regardless of task scheduling.
    pub async fn retrieve(&self, query: &str) -> BestMatch {
        if self.corpus.is_empty() {
            return BestMatch::miss();
        }

        let query: Arc<str> = Arc::from(query);
        let mut tasks = JoinSet::new();

        for index in 0..self.corpus.len() {
            let corpus = Arc::clone(&self.corpus);
            let table = Arc::clone(&self.table);
            let query = Arc::clone(&query);
            let limit = Arc::clone(&self.limit);

            tasks.spawn(async move {
                // Closing the semaphore is not part of this design, so the
                // only acquire failure is task abort, which ends us anyway.
                let _permit = limit.acquire_owned().await.ok()?;
                let doc = corpus.get(index)?;
                let score = scorer::score(&doc.text, &query, &table);
                (score > 0.0).then_some(SearchHit { index, score })
            });
        }

        let mut hits = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(hit)) => hits.push(hit),
                Ok(None) => {}
                Err(e) => tracing::warn!("Scoring task failed: {e}"),
            }
        }

        let best = hits.into_iter().fold(None::<SearchHit>, |best, hit| {
            match best {
                Some(b) if hit.score > b.score => Some(hit),
                Some(b) if hit.score == b.score && hit.index < b.index => Some(hit),
                Some(b) => Some(b),
                None => Some(hit),
            }
        });

        match best {
            Some(hit) => {
                tracing::debug!(
                    "Best match: index {} score {:.1} for query len {}",
                    hit.index,
                    hit.score,
                    query.len()
                );
                BestMatch {
                    document: self.corpus.get(hit.index).cloned(),
                    index: Some(hit.index),
                    score: hit.score,
                }
            }
            None => BestMatch::miss(),
        }
    }
}
