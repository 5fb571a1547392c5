//! Remote LLM backend implementations.
//!
//! Cloud-hosted APIs reached over HTTPS. These require API keys and handle
//! authentication, rate-limit, and transport errors explicitly.
//!
//! # Providers
//!
//! - **OpenAI** - OpenAI models and API-compatible services

pub mod openai;

pub use openai::OpenAiClient;
