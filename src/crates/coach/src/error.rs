//! Error types for Coach
//!
//! Provides a unified error type for all Coach operations.

use std::fmt;

/// Result type alias for Coach operations
pub type Result<T> = std::result::Result<T, CoachError>;

/// Main error type for Coach operations
#[derive(Debug)]
pub enum CoachError {
    /// Configuration error
    Config(String),

    /// Database error
    Database(String),

    /// Model reply could not be decoded into a turn plan
    Decode(String),

    /// Turn plan rejected by the validator
    Validation(Vec<String>),

    /// Food could not be resolved, even after estimation
    UnknownFood(String),

    /// Not found error
    NotFound(String),

    /// LLM backend error
    Llm(llm::LlmError),

    /// IO error
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serde(serde_json::Error),

    /// SQL error
    Sqlx(sqlx::Error),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for CoachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Decode(msg) => write!(f, "Decode error: {}", msg),
            Self::Validation(errors) => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            Self::UnknownFood(name) => write!(f, "Could not resolve food '{}'", name),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Llm(err) => write!(f, "LLM error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Serde(err) => write!(f, "Serialization error: {}", err),
            Self::Sqlx(err) => write!(f, "SQL error: {}", err),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CoachError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Llm(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Serde(err) => Some(err),
            Self::Sqlx(err) => Some(err),
            _ => None,
        }
    }
}

// Conversions from common error types
impl From<llm::LlmError> for CoachError {
    fn from(err: llm::LlmError) -> Self {
        Self::Llm(err)
    }
}

impl From<std::io::Error> for CoachError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err)
    }
}

impl From<sqlx::Error> for CoachError {
    fn from(err: sqlx::Error) -> Self {
        Self::Sqlx(err)
    }
}

impl From<anyhow::Error> for CoachError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for CoachError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

impl From<&str> for CoachError {
    fn from(msg: &str) -> Self {
        Self::Other(msg.to_string())
    }
}
