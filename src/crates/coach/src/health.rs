//! Health check functionality
//!
//! Provides system health verification for the database, configuration, and
//! the configured model backend.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Result;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All checks passed
    Healthy,
    /// Some checks failed but the system is partially operational
    Degraded,
    /// Critical checks failed, the system is not operational
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Individual component check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Check status
    pub status: HealthStatus,
    /// Human-readable message
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl ComponentHealth {
    /// Create a healthy component check
    pub fn healthy(name: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: Some("OK".to_string()),
            response_time_ms,
        }
    }

    /// Create a degraded component check
    pub fn degraded(
        name: impl Into<String>,
        message: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            response_time_ms,
        }
    }

    /// Create an unhealthy component check
    pub fn unhealthy(
        name: impl Into<String>,
        message: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms,
        }
    }
}

/// Overall system health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status
    pub status: HealthStatus,
    /// Individual component checks
    pub checks: Vec<ComponentHealth>,
    /// Total response time in milliseconds
    pub total_response_time_ms: u64,
    /// Timestamp of the check
    pub timestamp: i64,
}

impl HealthReport {
    /// Create a new health report from component checks
    pub fn new(checks: Vec<ComponentHealth>) -> Self {
        // Worst component status wins
        let status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        let total_response_time_ms = checks.iter().map(|c| c.response_time_ms).sum();
        let timestamp = chrono::Utc::now().timestamp();

        Self {
            status,
            checks,
            total_response_time_ms,
            timestamp,
        }
    }
}

/// Health checker for system components
pub struct HealthChecker;

impl HealthChecker {
    /// Check database health
    pub async fn check_database(db: &crate::db::Database) -> ComponentHealth {
        let start = Instant::now();

        match db.health_check().await {
            Ok(_) => ComponentHealth::healthy("database", start.elapsed().as_millis() as u64),
            Err(e) => ComponentHealth::unhealthy(
                "database",
                format!("Database error: {}", e),
                start.elapsed().as_millis() as u64,
            ),
        }
    }

    /// Check configuration validity
    pub fn check_config(config: &crate::config::CoachConfig) -> ComponentHealth {
        let start = Instant::now();

        let mut issues = Vec::new();

        if let Err(e) = crate::executor::LlmProvider::from_config(&config.llm) {
            issues.push(e.to_string());
        }

        match config.llm.provider.to_lowercase().as_str() {
            "ollama" if config.llm.ollama.model.is_empty() => {
                issues.push("Ollama model not configured".to_string());
            }
            "openai" => {
                let key_missing = match &config.llm.openai.api_key {
                    Some(key) => key.is_empty() || key.starts_with("${"),
                    None => true,
                };
                if key_missing {
                    issues.push("OpenAI API key not set".to_string());
                }
            }
            _ => {}
        }

        if config.chat.max_estimate_attempts == 0 {
            issues.push("max_estimate_attempts is 0, unknown foods will never resolve".to_string());
        }

        let response_time_ms = start.elapsed().as_millis() as u64;

        if issues.is_empty() {
            ComponentHealth::healthy("configuration", response_time_ms)
        } else {
            ComponentHealth::degraded("configuration", issues.join("; "), response_time_ms)
        }
    }

    /// Check whether the model backend is reachable
    ///
    /// An unreachable backend degrades the system rather than failing it;
    /// catalog and summary commands work without a model.
    pub async fn check_backend(backend: &dyn crate::executor::ModelBackend) -> ComponentHealth {
        let start = Instant::now();

        if backend.is_available().await {
            ComponentHealth::healthy("model_backend", start.elapsed().as_millis() as u64)
        } else {
            ComponentHealth::degraded(
                "model_backend",
                "Model endpoint not reachable",
                start.elapsed().as_millis() as u64,
            )
        }
    }

    /// Perform a comprehensive health check on a coach context
    pub async fn check_context(context: &crate::context::CoachContext) -> Result<HealthReport> {
        let mut checks = Vec::new();

        // Check database
        checks.push(Self::check_database(context.database()).await);

        // Check configuration
        checks.push(Self::check_config(context.config()));

        // Check model backend
        checks.push(Self::check_backend(context.backend().as_ref()).await);

        Ok(HealthReport::new(checks))
    }
}
