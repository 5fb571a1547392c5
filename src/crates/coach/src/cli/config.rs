//! Configuration helpers for CLI
//!
//! Provides utilities for loading configuration and creating coach contexts.

use crate::config::ConfigLoader;
use crate::context::{CoachContext, ContextBuilder};
use crate::db::Database;
use crate::error::{CoachError, Result};
use crate::init;
use std::sync::Arc;
use tracing::info;

/// Get or create a coach context from user configuration
///
/// This loads the configuration, initializes the database, and creates
/// a fully configured coach context ready for use.
///
/// # Errors
/// Returns error if configuration is invalid or context cannot be created
pub async fn get_or_create_context() -> Result<CoachContext> {
    info!("Loading configuration");
    let loader = ConfigLoader::new();
    let config = loader.load().await?;

    let db_path = config.database_path();

    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoachError::Database(format!("Failed to create database directory: {}", e))
            })?;
        }
    }

    info!(path = %db_path.display(), "Initializing database");
    let database = Arc::new(
        Database::with_max_connections(&db_path, config.database.max_connections).await?,
    );
    database.run_migrations().await?;

    let context = ContextBuilder::new()
        .with_database(database)
        .with_config(config)
        .build()?;

    info!("Coach context ready");
    Ok(context)
}

/// Check if coach is initialized
///
/// Returns true if the configuration file exists
pub fn is_initialized() -> bool {
    init::get_user_config_path()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Get initialization instructions
pub fn get_init_instructions() -> String {
    "Coach is not initialized. Run 'coach init' to get started.".to_string()
}
