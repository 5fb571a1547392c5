//! Error types for LLM backend clients.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when talking to an LLM backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize data.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// API key not found in environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// Backend service unavailable (e.g. Ollama not running).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the backend.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// General backend error.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::HttpError(_)
                | LlmError::ServiceUnavailable(_)
                | LlmError::Timeout(_)
                | LlmError::RateLimitExceeded(_)
        )
    }

    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::AuthenticationError(_) | LlmError::ApiKeyNotFound(_)
        )
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::ServiceUnavailable("down".to_string()).is_retryable());
        assert!(LlmError::Timeout("60s elapsed".to_string()).is_retryable());
        assert!(LlmError::RateLimitExceeded("slow down".to_string()).is_retryable());
        assert!(!LlmError::InvalidRequest("bad params".to_string()).is_retryable());
        assert!(!LlmError::AuthenticationError("bad key".to_string()).is_retryable());
    }

    #[test]
    fn test_auth_classification() {
        assert!(LlmError::AuthenticationError("401".to_string()).is_auth_error());
        assert!(LlmError::ApiKeyNotFound("OPENAI_API_KEY".to_string()).is_auth_error());
        assert!(!LlmError::ProviderError("500".to_string()).is_auth_error());
    }

    #[test]
    fn test_display_messages() {
        let err = LlmError::ConfigError("missing base_url".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing base_url");
    }
}
