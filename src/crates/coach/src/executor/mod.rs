//! Turn Executor - Executes conversation turns against the nutrition log
//!
//! This module turns model replies into database effects: it selects a model
//! backend, validates the reply payload, resolves unknown foods through
//! estimation, and dispatches the resulting actions.
//!
//! # Components
//!
//! - **LLM Integration** - Wraps llm crate providers behind the ModelBackend trait
//! - **Offline Backend** - Deterministic keyword backend, no model required
//! - **Resolver** - Food name to id resolution with estimate-and-store fallback
//! - **Dispatcher** - Applies validated actions through the repositories
//! - **Turn Executor** - Main engine for the parse, repair, dispatch cycle

mod dispatcher;
mod llm_provider;
mod offline;
mod resolver;
mod turn_executor;
pub mod prompts;
pub mod retry;

pub use dispatcher::{ActionDispatcher, ActionOutcome, ActionReport, LoggedItem};
pub use llm_provider::{LlmBackend, LlmProvider, ModelBackend};
pub use offline::OfflineCoach;
pub use resolver::FoodResolver;
pub use turn_executor::{TurnExecutor, TurnOutcome};
pub use retry::{with_retry, Retryable, RetryConfig};
