//! Configuration loader with dual-location support
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.coach/coach.toml
//! 3. Project-level config: ./.coach/coach.toml
//!
//! Later configs override earlier ones.

use crate::config::schema::CoachConfig;
use crate::error::{CoachError, Result};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// Configuration loader that handles both user and project configs
pub struct ConfigLoader {
    user_config_path: PathBuf,
    project_config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            user_config_path: Self::user_config_path(),
            project_config_path: Self::project_config_path(),
        }
    }

    /// Get user-level config path (~/.coach/coach.toml)
    fn user_config_path() -> PathBuf {
        dirs::home_dir()
            .expect("Failed to get home directory")
            .join(".coach")
            .join("coach.toml")
    }

    /// Get project-level config path (./.coach/coach.toml)
    fn project_config_path() -> PathBuf {
        std::env::current_dir()
            .expect("Failed to get current directory")
            .join(".coach")
            .join("coach.toml")
    }

    /// Load configuration from both locations with project taking precedence
    ///
    /// Priority order:
    /// 1. Default values
    /// 2. User-level config (~/.coach/coach.toml)
    /// 3. Project-level config (./.coach/coach.toml)
    ///
    /// Layering is field-wise: a file that sets only `database.max_connections`
    /// overrides that one value and leaves everything else from the earlier
    /// layers. A missing file is skipped; a file that fails to read or parse is
    /// an error rather than a silent fallback to defaults.
    pub async fn load(&self) -> Result<CoachConfig> {
        let mut layered = toml::Value::Table(toml::map::Map::new());

        for path in [&self.user_config_path, &self.project_config_path] {
            match self.read_value(path).await? {
                Some(value) => {
                    debug!(path = %path.display(), "Loaded config layer");
                    merge_value(&mut layered, value);
                }
                None => {
                    debug!(path = %path.display(), "No config file, skipping layer");
                }
            }
        }

        let mut config: CoachConfig = layered
            .try_into()
            .map_err(|e| CoachError::Config(format!("Invalid configuration: {}", e)))?;

        config.resolve_env_vars();

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse one config file into a TOML value, `None` when the file is absent
    async fn read_value(&self, path: &PathBuf) -> Result<Option<toml::Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CoachError::Config(format!("Failed to read config: {}", e)))?;

        let value = toml::from_str(&content).map_err(|e| {
            CoachError::Config(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(value))
    }

    /// Load configuration from a specific path
    async fn load_from_path(&self, path: &PathBuf) -> Result<CoachConfig> {
        match self.read_value(path).await? {
            Some(value) => value
                .try_into()
                .map_err(|e| CoachError::Config(format!("Failed to parse config: {}", e))),
            None => Err(CoachError::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
        }
    }

    /// Load only user-level config
    pub async fn load_user_config(&self) -> Result<CoachConfig> {
        self.load_from_path(&self.user_config_path).await
    }

    /// Get user config path
    pub fn get_user_config_path(&self) -> &PathBuf {
        &self.user_config_path
    }

    /// Get project config path
    pub fn get_project_config_path(&self) -> &PathBuf {
        &self.project_config_path
    }

    /// Check if user config exists
    pub fn user_config_exists(&self) -> bool {
        self.user_config_path.exists()
    }

    /// Check if project config exists
    pub fn project_config_exists(&self) -> bool {
        self.project_config_path.exists()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively merge `overlay` into `base`
///
/// Tables merge key by key; any other value in the overlay replaces the
/// base value outright.
fn merge_value(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
