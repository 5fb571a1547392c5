//! Configuration management for Coach
//!
//! Supports dual-location configuration:
//! - User-level: ~/.coach/coach.toml
//! - Project-level: ./.coach/coach.toml
//!
//! Project-level config overrides user-level config.

mod loader;
mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    ChatConfig, CoachConfig, DatabaseConfig, LlmConfig, LoggingConfig, OllamaConfig, OpenAiConfig,
};

use crate::Result;

/// Load configuration from both locations with project config taking precedence
///
/// Priority order:
/// 1. Default values
/// 2. User-level config (~/.coach/coach.toml)
/// 3. Project-level config (./.coach/coach.toml)
pub async fn load_config() -> Result<CoachConfig> {
    let loader = ConfigLoader::new();
    loader.load().await
}
