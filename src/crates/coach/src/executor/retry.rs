//! Retry logic with exponential backoff
//!
//! Provides a configurable retry mechanism for transient model call
//! failures. This covers transport problems only; semantically invalid
//! replies go through the turn executor's repair path instead.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Classifies failures as transient or permanent
///
/// [`with_retry`] gives up immediately on permanent failures; waiting out
/// the backoff schedule cannot fix a rejected API key or a malformed
/// request.
pub trait Retryable {
    /// Whether another attempt could succeed
    fn is_retryable(&self) -> bool;
}

impl Retryable for llm::LlmError {
    fn is_retryable(&self) -> bool {
        llm::LlmError::is_retryable(self)
    }
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: usize,

    /// Initial delay before first retry (in seconds)
    pub initial_delay_secs: u64,

    /// Maximum delay between retries (in seconds)
    pub max_delay_secs: u64,

    /// Multiplier for exponential backoff (e.g., 2.0 for doubling)
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_secs: 1,
            max_delay_secs: 30,
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(
        max_retries: usize,
        initial_delay_secs: u64,
        max_delay_secs: u64,
        multiplier: f64,
    ) -> Self {
        Self {
            max_retries,
            initial_delay_secs,
            max_delay_secs,
            multiplier,
        }
    }

    /// Calculate delay for a given attempt number (0-indexed)
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        let delay_secs = (self.initial_delay_secs as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = delay_secs.min(self.max_delay_secs as f64);
        Duration::from_secs(capped_delay as u64)
    }
}

/// Execute an operation with retry logic
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation_name` - Name of the operation for logging
/// * `operation` - Async function to execute
///
/// # Returns
/// Result of the operation after all retries exhausted or success
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display + Retryable,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let delay = config.calculate_delay(attempt - 1);
            debug!(
                operation = %operation_name,
                attempt = attempt,
                delay_secs = delay.as_secs(),
                "Retrying after delay"
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        operation = %operation_name,
                        attempt = attempt,
                        "Retry succeeded"
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() {
                    warn!(
                        operation = %operation_name,
                        error = %e,
                        "Operation failed with a non-retryable error"
                    );
                    return Err(e);
                }
                if attempt < config.max_retries {
                    warn!(
                        operation = %operation_name,
                        attempt = attempt + 1,
                        max_retries = config.max_retries,
                        error = %e,
                        "Operation failed, will retry"
                    );
                } else {
                    warn!(
                        operation = %operation_name,
                        attempt = attempt + 1,
                        error = %e,
                        "Operation failed, max retries exhausted"
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TestError::Transient => write!(f, "temporary failure"),
                TestError::Permanent => write!(f, "permanent failure"),
            }
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient)
        }
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_delay_secs, 1);
        assert_eq!(config.max_delay_secs, 30);
        assert_eq!(config.multiplier, 2.0);
    }

    #[test]
    fn test_calculate_delay_exponential() {
        let config = RetryConfig::new(3, 1, 60, 2.0);

        assert_eq!(config.calculate_delay(0).as_secs(), 1);
        assert_eq!(config.calculate_delay(1).as_secs(), 2);
        assert_eq!(config.calculate_delay(2).as_secs(), 4);
        assert_eq!(config.calculate_delay(3).as_secs(), 8);
    }

    #[test]
    fn test_calculate_delay_capped() {
        let config = RetryConfig::new(10, 10, 30, 2.0);

        assert_eq!(config.calculate_delay(0).as_secs(), 10);
        assert_eq!(config.calculate_delay(1).as_secs(), 20);
        // 40 seconds, capped at 30
        assert_eq!(config.calculate_delay(2).as_secs(), 30);
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_immediately() {
        let config = RetryConfig::new(3, 1, 60, 2.0);
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry(&config, "test-op", || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok::<i32, TestError>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_after_failures() {
        let config = RetryConfig::new(3, 0, 60, 2.0); // 0 delay for fast test
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry(&config, "test-op", || {
            let attempts = attempts_clone.clone();
            async move {
                let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if count < 3 {
                    Err(TestError::Transient)
                } else {
                    Ok::<i32, TestError>(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_exhausts_retries() {
        let config = RetryConfig::new(2, 0, 60, 2.0); // 0 delay for fast test
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry(&config, "test-op", || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<i32, TestError>(TestError::Transient)
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), TestError::Transient);
        // Initial attempt + 2 retries
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_stops_on_permanent_error() {
        let config = RetryConfig::new(3, 0, 0, 2.0);
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry(&config, "test-op", || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<i32, TestError>(TestError::Permanent)
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), TestError::Permanent);
        // No retries for a failure that cannot improve
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_llm_error_classification() {
        use llm::LlmError;

        assert!(Retryable::is_retryable(&LlmError::Timeout(
            "60s elapsed".to_string()
        )));
        assert!(!Retryable::is_retryable(&LlmError::AuthenticationError(
            "bad key".to_string()
        )));
    }
}
