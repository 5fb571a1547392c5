//! LLM Backend Integration
//!
//! Bridges the llm crate's ChatModel clients to the three model calls a
//! conversation makes: turn completion, food estimation, and reply repair.
//! Provider selection follows the `[llm]` configuration section; transient
//! transport failures are retried with backoff before surfacing.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use llm::config::{LocalLlmConfig, RemoteLlmConfig};
use llm::{ChatModel, ChatRequest, Message};

use crate::config::LlmConfig;
use crate::error::{CoachError, Result};
use crate::executor::offline::OfflineCoach;
use crate::executor::prompts;
use crate::executor::retry::{with_retry, RetryConfig};

/// The model calls a conversation turn can make
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Complete the next assistant reply for a transcript
    async fn complete(&self, transcript: &[Message]) -> Result<String>;

    /// Estimate average macros for a food missing from the catalog
    async fn estimate(&self, food_name: &str) -> Result<String>;

    /// Ask for a corrected version of an invalid reply
    async fn repair(&self, raw: &str, errors: &[String]) -> Result<String>;

    /// Whether the backend can currently serve requests
    async fn is_available(&self) -> bool {
        true
    }
}

/// Supported model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Deterministic heuristics, no network
    Offline,
    /// Local Ollama server
    Ollama,
    /// OpenAI or an API-compatible endpoint
    OpenAi,
}

impl LlmProvider {
    /// Select a provider from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        match config.provider.to_lowercase().as_str() {
            "offline" => Ok(Self::Offline),
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(CoachError::Config(format!(
                "Unsupported LLM provider: {}. Available: offline, ollama, openai",
                other
            ))),
        }
    }

    /// Build the backend for this provider
    pub fn create_backend(&self, config: &LlmConfig) -> Result<Arc<dyn ModelBackend>> {
        match self {
            Self::Offline => Ok(Arc::new(OfflineCoach::new())),

            Self::Ollama => {
                let local = LocalLlmConfig::new(
                    config.ollama.base_url.clone(),
                    config.ollama.model.clone(),
                )
                .with_timeout_seconds(config.ollama.timeout_seconds);
                let client = llm::local::OllamaClient::new(local);
                Ok(Arc::new(LlmBackend::new(Arc::new(client))))
            }

            Self::OpenAi => {
                // A leftover ${VAR} placeholder means the variable was unset
                let api_key = match &config.openai.api_key {
                    Some(key) if !key.is_empty() && !key.starts_with("${") => key.clone(),
                    _ => {
                        return Err(CoachError::Config(
                            "OpenAI API key not configured".to_string(),
                        ))
                    }
                };
                let remote = RemoteLlmConfig::new(
                    api_key,
                    config.openai.base_url.clone(),
                    config.openai.model.clone(),
                )
                .with_timeout_seconds(config.openai.timeout_seconds);
                let client = llm::remote::OpenAiClient::new(remote);
                Ok(Arc::new(LlmBackend::new(Arc::new(client))))
            }
        }
    }
}

/// [`ModelBackend`] backed by a ChatModel client
///
/// Prepends the system prompt on every call and asks for deterministic
/// output (temperature 0).
pub struct LlmBackend {
    model: Arc<dyn ChatModel>,
    retry: RetryConfig,
}

impl LlmBackend {
    /// Wrap a chat client with the default retry policy
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            retry: RetryConfig::default(),
        }
    }

    /// Override the transport retry policy
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn send(&self, operation: &str, messages: Vec<Message>) -> Result<String> {
        let response = with_retry(&self.retry, operation, || {
            let model = self.model.clone();
            let messages = messages.clone();
            async move {
                let request = ChatRequest::new(messages).with_temperature(0.0);
                model.chat(request).await
            }
        })
        .await?;

        Ok(response.text().to_string())
    }
}

#[async_trait]
impl ModelBackend for LlmBackend {
    async fn complete(&self, transcript: &[Message]) -> Result<String> {
        debug!(
            messages = transcript.len(),
            "Requesting completion for transcript"
        );
        let mut messages = vec![Message::system(prompts::SYSTEM_PROMPT)];
        messages.extend_from_slice(transcript);
        self.send("complete", messages).await
    }

    async fn estimate(&self, food_name: &str) -> Result<String> {
        debug!(food = %food_name, "Requesting food estimate");
        let messages = vec![
            Message::system(prompts::SYSTEM_PROMPT),
            Message::human(prompts::estimate_prompt(food_name)),
        ];
        self.send("estimate", messages).await
    }

    async fn repair(&self, raw: &str, errors: &[String]) -> Result<String> {
        debug!(errors = errors.len(), "Requesting reply repair");
        let messages = vec![
            Message::system(prompts::SYSTEM_PROMPT),
            Message::human(prompts::repair_prompt(raw, errors)),
        ];
        self.send("repair", messages).await
    }

    async fn is_available(&self) -> bool {
        self.model.is_available().await
    }
}
