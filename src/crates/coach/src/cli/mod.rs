//! CLI command implementations
//!
//! Provides command handlers for the coach CLI binary.

pub mod chat;
pub mod config;
pub mod food;
pub mod goal;
pub mod helpers;
pub mod log;
pub mod seed;
pub mod summary;

pub use config::{get_or_create_context, is_initialized, get_init_instructions};
