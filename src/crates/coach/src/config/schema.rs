//! Configuration schema for Coach

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Coach configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoachConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Chat turn configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
///
/// Every section is deserializable from a partial table; absent fields
/// fall back to the `Default` impl.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path (relative to ~/.coach or absolute)
    pub path: String,

    /// Maximum connections in the pool
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "coach.db".to_string(),
            max_connections: default_max_connections(),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// LLM provider: "offline", "ollama", or "openai"
    pub provider: String,

    /// Ollama settings, used when provider = "ollama"
    pub ollama: OllamaConfig,

    /// OpenAI settings, used when provider = "openai"
    pub openai: OpenAiConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "offline".to_string(),
            ollama: OllamaConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// Ollama endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// OpenAI endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (supports environment variable interpolation)
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Chat turn configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Repair round-trips allowed when a turn plan fails validation
    pub max_repair_attempts: u32,

    /// Estimation attempts allowed per unknown food
    pub max_estimate_attempts: u32,
}

fn default_max_repair_attempts() -> u32 {
    1
}

fn default_max_estimate_attempts() -> u32 {
    1
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_repair_attempts: default_max_repair_attempts(),
            max_estimate_attempts: default_max_estimate_attempts(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "compact", "pretty"
    pub format: String,

    /// Enable colored output
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            colored: true,
        }
    }
}

impl CoachConfig {
    /// Resolve environment variables in configuration values
    ///
    /// Supports ${VAR_NAME} syntax in string fields
    pub fn resolve_env_vars(&mut self) {
        if let Some(ref api_key) = self.llm.openai.api_key {
            self.llm.openai.api_key = Some(Self::expand_env_var(api_key));
        }

        self.llm.openai.base_url = Self::expand_env_var(&self.llm.openai.base_url);
        self.llm.ollama.base_url = Self::expand_env_var(&self.llm.ollama.base_url);
    }

    /// Expand environment variable in a string
    ///
    /// Supports ${VAR_NAME} syntax
    fn expand_env_var(value: &str) -> String {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            std::env::var(var_name).unwrap_or_else(|_| value.to_string())
        } else {
            value.to_string()
        }
    }

    /// Get the resolved database path
    ///
    /// If path is relative, resolves it relative to ~/.coach
    pub fn database_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.database.path);

        if path.is_absolute() {
            path
        } else {
            // Resolve relative to ~/.coach
            dirs::home_dir()
                .expect("Failed to get home directory")
                .join(".coach")
                .join(path)
        }
    }
}
