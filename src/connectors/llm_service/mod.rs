//! LLM provider connector
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. One
//! [`LlmClient`] is built per API key and memoized by [`ClientCache`].

mod cache;
mod client;
mod errors;

pub use cache::ClientCache;
pub use client::{ChatMessage, LlmClient};
pub use errors::LlmError;
