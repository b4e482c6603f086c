//! # Grounder Engine
//!
//! The answering pipeline: retrieve the best-matching corpus fragment,
//! compose the grounded prompt, call the completion backend, return the
//! reply. The engine owns the retriever and the backend; the gateway and
//! the CLI both drive it.

pub mod prompt;

use std::sync::Arc;

use grounder_core::traits::CompletionBackend;
use grounder_corpus::{Corpus, SynonymTable};
use grounder_retrieval::{BestMatch, Retriever};

/// The full outcome of one query.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Answer {
    pub query: String,
    /// The best-matching fragment, or `None` when nothing scored above zero.
    /// The prompt-side fallback text is never echoed here.
    pub context: Option<String>,
    pub score: f32,
    pub reply: String,
}

pub struct Engine {
    retriever: Retriever,
    backend: Box<dyn CompletionBackend>,
}

impl Engine {
    pub fn new(
        corpus: Arc<Corpus>,
        table: Arc<SynonymTable>,
        backend: Box<dyn CompletionBackend>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            retriever: Retriever::new(corpus, table, max_concurrency),
            backend,
        }
    }

    pub fn corpus_size(&self) -> usize {
        self.retriever.corpus().len()
    }

    pub fn synonym_topics(&self) -> usize {
        self.retriever.table().len()
    }

    pub fn model_name(&self) -> &str {
        self.backend.model()
    }

    /// Retrieval only: best context and score, no model call.
    pub async fn search(&self, query: &str) -> BestMatch {
        self.retriever.retrieve(query).await
    }

    /// Answer a query end to end.
    ///
    /// Completion failures do not propagate: the reply slot carries a
    /// placeholder describing the failure and the caller still gets a
    /// well-formed `Answer`. Operators find the real error in the logs.
    pub async fn answer(&self, query: &str) -> Answer {
        let best = self.retriever.retrieve(query).await;
        if best.is_miss() {
            tracing::info!("No local match; falling back to bare model knowledge");
        }

        let context = best.document.map(|d| d.text);
        let prompt = prompt::build_prompt(context.as_deref(), query);

        let reply = match self.backend.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Completion call failed: {e}");
                format!("The assistant is unavailable: {e}")
            }
        };

        Answer {
            query: query.to_string(),
            context,
            score: best.score,
            reply,
        }
    }
}
