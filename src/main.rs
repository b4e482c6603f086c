//! # Grounder — minimal RAG answering service
//!
//! Keeps a line-per-document text corpus in memory, scores it against each
//! query with literal substring matching plus a synonym/topic table, and
//! asks a chat-completion endpoint to answer using the best fragment as
//! background material.
//!
//! Usage:
//!   grounder serve                   # Start the HTTP gateway
//!   grounder serve --port 8080       # Custom port
//!   grounder ask "天气冷不冷"         # One-shot terminal query

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grounder_core::GrounderConfig;
use grounder_corpus::{Corpus, SynonymTable};
use grounder_engine::Engine;

#[derive(Parser)]
#[command(
    name = "grounder",
    version,
    about = "Minimal RAG answering service over a local text corpus"
)]
struct Cli {
    /// Config file path (default: ~/.grounder/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ask one question and print the reply
    Ask {
        /// The question text
        question: String,
    },
}

fn expand_path(p: &str) -> String {
    shellexpand::tilde(p).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "grounder=debug,tower_http=debug"
    } else {
        "grounder=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    // Load configuration — an explicit --config that is missing or broken is
    // fatal; without the flag a missing default file just means defaults.
    let config = match &cli.config {
        Some(path) => {
            let path = expand_path(path);
            GrounderConfig::load_from(std::path::Path::new(&path))
                .with_context(|| format!("loading config {path}"))?
        }
        None => GrounderConfig::load().context("loading config")?,
    };

    // Every load failure is fatal and reported; the service never starts
    // with a silently empty corpus or synonym table.
    let corpus_dir = expand_path(&config.corpus.dir);
    let corpus = Corpus::load_dir(std::path::Path::new(&corpus_dir))
        .with_context(|| format!("loading corpus from {corpus_dir}"))?;

    let synonyms_path = expand_path(&config.synonyms.path);
    let table = SynonymTable::load(std::path::Path::new(&synonyms_path))
        .with_context(|| format!("loading synonyms from {synonyms_path}"))?;

    tracing::info!(
        "📚 Loaded {} document(s), {} synonym topic(s)",
        corpus.len(),
        table.len()
    );

    let backend = grounder_providers::create_backend(&config.llm)?;
    let engine = Arc::new(Engine::new(
        Arc::new(corpus),
        Arc::new(table),
        backend,
        config.retrieval.effective_concurrency(),
    ));

    match cli.command {
        Command::Serve { port } => {
            let mut gateway = config.gateway.clone();
            if let Some(port) = port {
                gateway.port = port;
            }

            println!("grounder v{}", env!("CARGO_PKG_VERSION"));
            println!("   Gateway:  http://{}:{}", gateway.host, gateway.port);
            println!("   Corpus:   {} document(s) from {corpus_dir}", engine.corpus_size());
            println!("   Synonyms: {} topic(s) from {synonyms_path}", engine.synonym_topics());
            println!("   Model:    {}", engine.model_name());
            println!();

            grounder_gateway::start(&gateway, engine)
                .await
                .context("gateway server")?;
        }
        Command::Ask { question } => {
            let answer = engine.answer(&question).await;
            match &answer.context {
                Some(context) => {
                    tracing::debug!("Context (score {:.1}): {context}", answer.score)
                }
                None => tracing::debug!("No local match; asked the model directly"),
            }
            println!("{}", answer.reply);
        }
    }

    Ok(())
}
