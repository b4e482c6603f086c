//! OpenAI-compatible chat-completion client.
//!
//! One POST per call, bearer auth, no retry and no backoff: a transport or
//! API failure surfaces as an error and the engine decides what the caller
//! sees. The request timeout is the only bound on the call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use grounder_core::config::LlmConfig;
use grounder_core::error::{GrounderError, Result};
use grounder_core::traits::CompletionBackend;

/// Returned when the endpoint answers 200 with an empty `choices` array.
pub const NO_REPLY_SENTINEL: &str = "The model returned no reply.";

/// Environment variables consulted when the config carries no API key.
const API_KEY_ENV_VARS: &[&str] = &["DEEPSEEK_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

/// A chat-completion endpoint speaking the OpenAI wire format.
pub struct ChatCompletionClient {
    base_url: String,
    chat_path: String,
    model: String,
    /// Resolved once at construction; never logged.
    api_key: String,
    client: reqwest::Client,
}

impl ChatCompletionClient {
    /// Create from config. API key resolution: `llm.api_key` when set,
    /// otherwise the first populated entry of [`API_KEY_ENV_VARS`]. An
    /// absent key is not an error here — only at call time — so offline
    /// commands (corpus inspection, search-only) still work.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            API_KEY_ENV_VARS
                .iter()
                .find_map(|key| std::env::var(key).ok())
                .unwrap_or_default()
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GrounderError::Http(format!("Cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            chat_path: config.chat_path.clone(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionClient {
    fn name(&self) -> &str {
        "chat-completion"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(GrounderError::ApiKeyMissing(self.name().into()));
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}{}", self.base_url, self.chat_path);
        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| GrounderError::Http(format!("Connection to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(GrounderError::Provider(format!(
                "API error {status}: {text}"
            )));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| GrounderError::Http(format!("Malformed completion response: {e}")))?;

        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => {
                tracing::debug!("Completion response carried no choices");
                Ok(NO_REPLY_SENTINEL.to_string())
            }
        }
    }
}
