//! Context management
//!
//! Provides unified access to resources while handling commands and chats.
//!
//! # Components
//!
//! - **CoachContext** - Main context struct with database, repositories, model backend, and config
//! - **ChatSession** - Conversation transcript tracking
//! - **ContextBuilder** - Fluent builder for creating contexts

mod chat_session;
mod coach_context;

pub use chat_session::ChatSession;
pub use coach_context::{CoachContext, ContextBuilder};
