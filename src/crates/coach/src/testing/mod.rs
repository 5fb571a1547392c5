//! Test infrastructure and helpers
//!
//! Provides test database creation and cleanup for in-crate tests.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::db::Database;
use crate::error::{CoachError, Result};

/// Test database context that automatically cleans up on drop
///
/// Creates a real SQLite file in a temporary directory and runs the full
/// migration set, so tests exercise the same schema production uses.
pub struct TestDatabase {
    /// Temporary directory holding the database file
    _temp_dir: TempDir,

    /// Migrated database handle
    database: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated test database in a temporary directory
    ///
    /// The database and its directory are removed when the value drops.
    pub async fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| CoachError::Other(format!("Failed to create temp dir: {}", e)))?;

        let database = Database::new(temp_dir.path().join("coach.db")).await?;
        database.run_migrations().await?;

        Ok(Self {
            _temp_dir: temp_dir,
            database: Arc::new(database),
        })
    }

    /// Get a handle to the migrated database
    pub fn database(&self) -> Arc<Database> {
        self.database.clone()
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> PathBuf {
        self._temp_dir.path().to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let test_db = TestDatabase::new().await.unwrap();
        test_db.database().health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_database_cleanup() {
        let path = {
            let test_db = TestDatabase::new().await.unwrap();
            test_db.database().close().await;
            test_db.path()
        };
        // After drop, the temp dir should be gone
        assert!(!path.exists());
    }
}
