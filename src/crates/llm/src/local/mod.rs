//! Local LLM backend implementations.
//!
//! Backends running on localhost or the local network. No API keys, data
//! stays on the machine, and they work offline.
//!
//! # Providers
//!
//! - **Ollama** - Popular local LLM runner with wide model support

pub mod ollama;

pub use ollama::OllamaClient;
