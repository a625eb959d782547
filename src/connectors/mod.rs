//! External Service Connectors
//!
//! Adapters for the services pdfchat talks to but does not own. Today that is
//! the LLM provider: an OpenAI-compatible chat completions API (Groq by
//! default).
//!
//! ## Architecture Pattern
//!
//! 1. Configuration in `config.rs` → base URL, model and timeout per environment
//! 2. HTTP client in `{service}/client.rs`
//! 3. Shared state (the per-key client cache) is an explicit component,
//!    created once in `startup` and injected into services
//!
//! ## Usage in Services
//!
//! ```ignore
//! let cache = Arc::new(ClientCache::new(settings.connectors.llm_service.clone()));
//! let client = cache.get_or_create(&api_key).await?;
//! let answer = client.chat(&messages).await?;
//! ```

pub mod config;
pub mod llm_service;

pub use config::{ConnectorConfig, LlmServiceConfig};
pub use llm_service::{ChatMessage, ClientCache, LlmClient, LlmError};
