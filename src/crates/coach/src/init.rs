//! Initialization module for Coach
//!
//! Handles first-time setup including directory creation, database initialization,
//! and configuration file generation.

use crate::error::{CoachError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration directory name
pub const CONFIG_DIR: &str = ".coach";

/// Default configuration file name
pub const CONFIG_FILE: &str = "coach.toml";

/// Default database file name
pub const DATABASE_FILE: &str = "coach.db";

/// Get the Coach home directory (~/.coach)
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined
pub fn get_coach_home() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR))
        .ok_or_else(|| CoachError::Config("Could not determine home directory".to_string()))
}

/// Get the path to the user-level configuration file
pub fn get_user_config_path() -> Result<PathBuf> {
    Ok(get_coach_home()?.join(CONFIG_FILE))
}

/// Get the path to the database file
pub fn get_database_path() -> Result<PathBuf> {
    Ok(get_coach_home()?.join(DATABASE_FILE))
}

/// Check if Coach is initialized
///
/// Returns true if the ~/.coach directory exists and contains a config file
pub fn is_initialized() -> bool {
    get_coach_home()
        .map(|home| home.exists() && home.join(CONFIG_FILE).exists())
        .unwrap_or(false)
}

/// Initialize Coach directories and configuration
///
/// Creates:
/// - ~/.coach directory
/// - ~/.coach/coach.toml with default configuration
/// - ~/.coach/coach.db (database initialization happens separately)
///
/// # Arguments
///
/// * `force` - If true, overwrite existing configuration
pub fn initialize(force: bool) -> Result<()> {
    let coach_home = get_coach_home()?;

    info!(path = %coach_home.display(), "Initializing Coach");

    // Create ~/.coach directory
    if !coach_home.exists() {
        fs::create_dir_all(&coach_home)
            .map_err(|e| CoachError::Config(format!("Failed to create directory: {}", e)))?;
        info!(path = %coach_home.display(), "Created Coach home directory");
    } else {
        info!(path = %coach_home.display(), "Coach home directory already exists");
    }

    // Create default configuration if it doesn't exist or force is true
    let config_path = coach_home.join(CONFIG_FILE);
    if !config_path.exists() || force {
        create_default_config(&config_path)?;
        info!(path = %config_path.display(), "Created default configuration");
    } else {
        warn!(path = %config_path.display(), "Configuration already exists (use --force to overwrite)");
    }

    // Database initialization will be handled by the db module
    let db_path = coach_home.join(DATABASE_FILE);
    if !db_path.exists() {
        info!(path = %db_path.display(), "Database will be created on first use");
    } else {
        info!(path = %db_path.display(), "Database already exists");
    }

    Ok(())
}

/// Create default configuration file
fn create_default_config(path: &Path) -> Result<()> {
    let default_config = r#"# Coach Configuration
#
# This is the user-level configuration file for Coach.
# Project-specific settings can be placed in ./.coach/coach.toml

[database]
# Database file path (relative to ~/.coach)
path = "coach.db"

# Maximum connections in the pool
max_connections = 5

[llm]
# LLM provider: "offline", "ollama", "openai"
#
# "offline" needs no server and understands plain commands like
# "set goal 2000 150 200 70" and "log 2 eggs".
provider = "offline"

[llm.ollama]
# Base URL of the Ollama server
base_url = "http://localhost:11434"

# Model name
model = "llama3.1"

# Request timeout in seconds
timeout_seconds = 60

[llm.openai]
# API key (can use environment variables like ${OPENAI_API_KEY})
# api_key = "${OPENAI_API_KEY}"

# API base URL
base_url = "https://api.openai.com/v1"

# Model name
model = "gpt-4o-mini"

# Request timeout in seconds
timeout_seconds = 60

[chat]
# Repair round-trips allowed when a turn plan fails validation
max_repair_attempts = 1

# Estimation attempts allowed per unknown food
max_estimate_attempts = 1

[logging]
# Log level: "trace", "debug", "info", "warn", "error"
level = "info"

# Log format: "compact", "pretty"
format = "compact"

# Enable colored output
colored = true
"#;

    fs::write(path, default_config)
        .map_err(|e| CoachError::Config(format!("Failed to write configuration: {}", e)))?;

    Ok(())
}
