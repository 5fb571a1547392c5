//! Core chat types and the `ChatModel` trait.
//!
//! Every backend client in this crate speaks the same minimal vocabulary: a
//! request carrying an ordered message list plus generation parameters, and a
//! response carrying the assistant message plus usage statistics. Providers
//! translate these to and from their own wire formats.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions and constraints for the model.
    System,
    /// End-user input.
    Human,
    /// Model output.
    Assistant,
}

/// One message in a conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the sender.
    pub role: MessageRole,

    /// Plain text content.
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Human, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Text content of the message.
    pub fn text(&self) -> &str {
        &self.content
    }
}

/// Generation parameters for a chat request.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    /// Sampling temperature. `None` leaves the provider default.
    pub temperature: Option<f32>,

    /// Maximum tokens to generate. `None` leaves the provider default.
    pub max_tokens: Option<usize>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Sequences that halt generation.
    pub stop_sequences: Vec<String>,
}

/// A request to a chat model: messages plus configuration.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The conversation messages to send to the model.
    pub messages: Vec<Message>,

    /// Generation configuration.
    pub config: ChatConfig,
}

impl ChatRequest {
    /// Create a request with default configuration.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            config: ChatConfig::default(),
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    /// Set top-p (nucleus) sampling.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.config.top_p = Some(top_p);
        self
    }

    /// Set sequences that halt generation.
    pub fn with_stop_sequences(mut self, sequences: Vec<String>) -> Self {
        self.config.stop_sequences = sequences;
        self
    }
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Tokens consumed by the prompt.
    pub input_tokens: usize,

    /// Tokens generated in the reply.
    pub output_tokens: usize,

    /// Input plus output.
    pub total_tokens: usize,
}

impl UsageMetadata {
    /// Create usage metadata from input/output counts.
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// A complete reply from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant's message.
    pub message: Message,

    /// Token usage, when the provider reports it.
    pub usage: Option<UsageMetadata>,

    /// Provider-specific extras (model name, finish reason, timings).
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ChatResponse {
    /// Text content of the assistant's message.
    pub fn text(&self) -> &str {
        self.message.text()
    }
}

/// Provider-agnostic interface for chat-based language models.
///
/// Implementations handle message conversion, transport, and response
/// parsing for one backend. They must be `Send + Sync` so a client can be
/// shared across async tasks.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate one complete reply for the given request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Whether the backend is reachable. Defaults to `true` for providers
    /// without a cheap health endpoint.
    async fn is_available(&self) -> bool {
        true
    }
}
