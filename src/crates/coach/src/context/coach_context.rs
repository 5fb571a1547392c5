//! Coach context wiring
//!
//! Provides unified access to all resources a command needs.

use crate::config::CoachConfig;
use crate::db::Database;
use crate::error::{CoachError, Result};
use crate::executor::{ActionDispatcher, FoodResolver, LlmProvider, ModelBackend, TurnExecutor};
use crate::repositories::{FoodRepository, GoalRepository, LogRepository};
use std::sync::Arc;
use tracing::info;

/// Context that provides access to all resources
#[derive(Clone)]
pub struct CoachContext {
    /// Database connection
    database: Arc<Database>,

    /// Model backend for conversation, estimation, and repair
    backend: Arc<dyn ModelBackend>,

    /// Turn executor driving the chat loop
    turn_executor: Arc<TurnExecutor>,

    /// Food catalog repository
    food_repository: FoodRepository,

    /// Goal repository
    goal_repository: GoalRepository,

    /// Meal log repository
    log_repository: LogRepository,

    /// Configuration
    config: CoachConfig,
}

impl CoachContext {
    /// Get database connection
    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    /// Get the model backend
    pub fn backend(&self) -> &Arc<dyn ModelBackend> {
        &self.backend
    }

    /// Get the turn executor
    pub fn turn_executor(&self) -> &Arc<TurnExecutor> {
        &self.turn_executor
    }

    /// Get food repository
    pub fn food_repository(&self) -> &FoodRepository {
        &self.food_repository
    }

    /// Get goal repository
    pub fn goal_repository(&self) -> &GoalRepository {
        &self.goal_repository
    }

    /// Get log repository
    pub fn log_repository(&self) -> &LogRepository {
        &self.log_repository
    }

    /// Get configuration
    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Build a dispatcher for direct, non-conversational commands
    pub fn dispatcher(&self) -> ActionDispatcher {
        let resolver = FoodResolver::new(self.database.clone(), self.backend.clone())
            .with_max_estimate_attempts(self.config.chat.max_estimate_attempts);
        ActionDispatcher::new(self.database.clone(), resolver)
    }
}

/// Builder for creating coach contexts
pub struct ContextBuilder {
    database: Option<Arc<Database>>,
    config: Option<CoachConfig>,
    backend: Option<Arc<dyn ModelBackend>>,
}

impl ContextBuilder {
    /// Create a new context builder
    pub fn new() -> Self {
        Self {
            database: None,
            config: None,
            backend: None,
        }
    }

    /// Set database
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }

    /// Set configuration
    pub fn with_config(mut self, config: CoachConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the model backend, overriding the one the config selects
    pub fn with_backend(mut self, backend: Arc<dyn ModelBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Build the coach context
    ///
    /// # Errors
    /// Returns error if required components are missing or the configured
    /// model backend cannot be created
    pub fn build(self) -> Result<CoachContext> {
        let database = self
            .database
            .ok_or_else(|| CoachError::Config("Database is required for coach context".to_string()))?;

        let config = self
            .config
            .ok_or_else(|| CoachError::Config("Configuration is required for coach context".to_string()))?;

        let backend = match self.backend {
            Some(backend) => backend,
            None => LlmProvider::from_config(&config.llm)?.create_backend(&config.llm)?,
        };

        let food_repository = FoodRepository::new(database.clone());
        let goal_repository = GoalRepository::new(database.clone());
        let log_repository = LogRepository::new(database.clone());

        let resolver = FoodResolver::new(database.clone(), backend.clone())
            .with_max_estimate_attempts(config.chat.max_estimate_attempts);
        let dispatcher = ActionDispatcher::new(database.clone(), resolver);
        let turn_executor = Arc::new(TurnExecutor::new(
            backend.clone(),
            dispatcher,
            config.chat.clone(),
        ));

        info!(provider = %config.llm.provider, "Coach context initialized");

        Ok(CoachContext {
            database,
            backend,
            turn_executor,
            food_repository,
            goal_repository,
            log_repository,
            config,
        })
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_database() -> Arc<Database> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let db = Arc::new(Database {
            pool: Arc::new(pool),
        });
        db.run_migrations().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_context_builder_missing_database() {
        let result = ContextBuilder::new().with_config(CoachConfig::default()).build();

        let err = result.err().unwrap();
        assert!(err.to_string().contains("Database is required"));
    }

    #[tokio::test]
    async fn test_context_builder_missing_config() {
        let db = test_database().await;

        let result = ContextBuilder::new().with_database(db).build();

        let err = result.err().unwrap();
        assert!(err.to_string().contains("Configuration is required"));
    }

    #[tokio::test]
    async fn test_context_builder_success() {
        let db = test_database().await;

        let context = ContextBuilder::new()
            .with_database(db)
            .with_config(CoachConfig::default())
            .build()
            .unwrap();

        // Default config selects the offline backend
        assert_eq!(context.config().llm.provider, "offline");
        context.database().health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_context_repositories_share_the_database() {
        let db = test_database().await;

        let context = ContextBuilder::new()
            .with_database(db)
            .with_config(CoachConfig::default())
            .build()
            .unwrap();

        let food = crate::models::NewFood {
            name: "egg".to_string(),
            serving_desc: "1 large".to_string(),
            cal: 70.0,
            protein: 6.0,
            carbs: 0.6,
            fat: 5.0,
            provenance: crate::models::Provenance::User,
        };
        let id = context.food_repository().upsert(&food).await.unwrap();

        let found = context.food_repository().find_id_by_name("egg").await.unwrap();
        assert_eq!(found, Some(id));
    }
}
