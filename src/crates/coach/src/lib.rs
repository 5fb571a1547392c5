//! # Coach - Conversational Nutrition Tracker
//!
//! A chat-driven nutrition assistant that turns free-form messages like
//! "log two eggs and a banana" into structured actions against a local
//! SQLite food diary.
//!
//! ## Features
//!
//! - **Structured Turns** - Every model reply is a strict JSON payload of
//!   actions plus a spoken sentence, validated before anything executes
//! - **Self-Repair** - Invalid payloads get one local date fix and one
//!   model-side repair attempt before the turn gives up politely
//! - **Food Resolution** - Unknown foods are estimated by the model and
//!   persisted with their provenance, so estimates are visible later
//! - **SQLite Database** - Persistent state stored in `~/.coach/coach.db`
//! - **Dual-Location Config** - User-level and project-level configuration
//! - **Offline Mode** - A deterministic scripted backend for use without
//!   any model endpoint
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coach::{load_config, ChatSession, ContextBuilder};
//! use coach::db::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config().await?;
//! let database = Database::new(config.database_path()).await?;
//! database.run_migrations().await?;
//!
//! let context = ContextBuilder::new()
//!     .with_database(Arc::new(database))
//!     .with_config(config)
//!     .build()?;
//!
//! let mut session = ChatSession::new();
//! let today = chrono::Local::now().date_naive();
//! let outcome = context
//!     .turn_executor()
//!     .execute_turn(&mut session, "log 2 eggs", today)
//!     .await?;
//! println!("{}", outcome.speak);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Coach is designed for local, single-user use. One process owns the
//! database, the chat session lives in memory for the lifetime of the
//! process, and model calls go out through a pluggable backend so the
//! same turn pipeline runs against Ollama, OpenAI-compatible endpoints,
//! or the built-in offline coach.

// Core modules
pub mod cli;
pub mod config;
pub mod context;
pub mod db;
pub mod health;
pub mod init;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod turn;
pub mod version;

// Turn execution and model backends
pub mod executor;

// Test infrastructure
#[cfg(test)]
pub mod testing;

// Error types and utilities
mod error;

// Re-export key types for convenience
pub use context::{ChatSession, CoachContext, ContextBuilder};
pub use executor::{
    ActionDispatcher, ActionOutcome, ActionReport, FoodResolver, LlmProvider, ModelBackend,
    OfflineCoach, TurnExecutor, TurnOutcome,
};
pub use turn::{Action, MealItem, TurnPlan};

// Error types
pub use error::{CoachError, Result};

// Re-export version utilities
pub use version::{full_version as version_info, short_version, VersionInfo};

// Re-export database and config types
pub use config::{CoachConfig, ConfigLoader, load_config};
pub use db::Database;

// Re-export repositories
pub use repositories::{FoodRepository, GoalRepository, LogRepository};

// Re-export models
pub use models::{DaySummary, Food, Goal, MacroTotals, NewFood, Provenance, SummaryItem};

// Re-export health types
pub use health::{ComponentHealth, HealthChecker, HealthReport, HealthStatus};
