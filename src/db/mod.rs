//! Conversation persistence
//!
//! Routes and services only see the [`ConversationStore`] trait object; the
//! PostgreSQL implementation is wired in `main`, the in-memory one backs tests
//! and database-less local runs.

pub mod conversation;
pub mod memory;

use crate::models;
use async_trait::async_trait;
use thiserror::Error;

pub use conversation::PgConversationStore;
pub use memory::InMemoryConversationStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Conversation {0} not found")]
    NotFound(String),
    #[error("Conversation {0} already exists")]
    AlreadyExists(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn insert(
        &self,
        conversation: models::NewConversation,
    ) -> Result<models::Conversation, StoreError>;

    async fn fetch(&self, id: &str) -> Result<Option<models::Conversation>, StoreError>;

    /// Conversations of one owner, most recently updated first.
    async fn list_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<models::ConversationSummary>, StoreError>;

    /// Appends one entry to the end of `messages` as a single atomic write.
    async fn append_message(
        &self,
        id: &str,
        entry: models::MessageEntry,
    ) -> Result<models::Conversation, StoreError>;

    /// Attaches PDF name and text, creating a placeholder conversation when
    /// `id` is unknown.
    async fn upsert_pdf(
        &self,
        id: &str,
        pdf_name: &str,
        pdf_text: &str,
    ) -> Result<models::Conversation, StoreError>;
}
