//! Grounder configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GrounderConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub synonyms: SynonymsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl GrounderConfig {
    /// Load config from the default path (~/.grounder/config.toml).
    /// A missing file yields the defaults; a present-but-broken file is an error.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::GrounderError::Config(format!("Failed to read config: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::GrounderError::Config(format!("Failed to parse config: {e}"))
        })?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".grounder")
            .join("config.toml")
    }

    /// Get the grounder home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".grounder")
    }
}

/// Corpus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory scanned for plain-text corpus files, one document per line.
    #[serde(default = "default_corpus_dir")]
    pub dir: String,
}

fn default_corpus_dir() -> String { "data".into() }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { dir: default_corpus_dir() }
    }
}

/// Synonym table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymsConfig {
    /// Path of the JSON synonym file: `{"synonyms": {"topic": ["word", ...]}}`.
    #[serde(default = "default_synonyms_path")]
    pub path: String,
}

fn default_synonyms_path() -> String { "synonyms.json".into() }

impl Default for SynonymsConfig {
    fn default() -> Self {
        Self { path: default_synonyms_path() }
    }
}

/// Completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Overrides the environment lookup when non-empty. Never logged.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String { "https://api.deepseek.com".into() }
fn default_chat_path() -> String { "/chat/completions".into() }
fn default_model() -> String { "deepseek-chat".into() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chat_path: default_chat_path(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Upper bound on concurrently running scoring tasks.
    /// 0 means "use available parallelism".
    #[serde(default)]
    pub max_concurrency: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { max_concurrency: 0 }
    }
}

impl RetrievalConfig {
    /// Resolve the effective scoring-task bound.
    pub fn effective_concurrency(&self) -> usize {
        if self.max_concurrency > 0 {
            self.max_concurrency
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GrounderConfig::default();
        assert_eq!(config.corpus.dir, "data");
        assert_eq!(config.synonyms.path, "synonyms.json");
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.gateway.port, 3000);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [corpus]
            dir = "/srv/kb"

            [llm]
            endpoint = "http://localhost:11434/v1"
            model = "llama3.2"

            [gateway]
            port = 8080
        "#;

        let config: GrounderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.corpus.dir, "/srv/kb");
        assert_eq!(config.llm.endpoint, "http://localhost:11434/v1");
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.gateway.port, 8080);
        // untouched sections keep their defaults
        assert_eq!(config.llm.chat_path, "/chat/completions");
        assert_eq!(config.gateway.host, "127.0.0.1");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let toml_str = "";
        let config: GrounderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.endpoint, "https://api.deepseek.com");
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.retrieval.max_concurrency, 0);
    }

    #[test]
    fn test_effective_concurrency_override() {
        let cfg = RetrievalConfig { max_concurrency: 2 };
        assert_eq!(cfg.effective_concurrency(), 2);
        let auto = RetrievalConfig { max_concurrency: 0 };
        assert!(auto.effective_concurrency() >= 1);
    }

    #[test]
    fn test_home_dir() {
        let home = GrounderConfig::home_dir();
        assert!(home.to_string_lossy().contains("grounder"));
    }
}
