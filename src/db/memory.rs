use super::{ConversationStore, StoreError};
use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store. Every operation runs under one lock, so appends are
/// as atomic as the PostgreSQL ones.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, models::Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn insert(
        &self,
        conversation: models::NewConversation,
    ) -> Result<models::Conversation, StoreError> {
        let mut conversations = self.conversations.write().await;
        if conversations.contains_key(&conversation.id) {
            return Err(StoreError::AlreadyExists(conversation.id));
        }

        let now = Utc::now();
        let stored = models::Conversation {
            id: conversation.id,
            name: conversation.name,
            messages: conversation.messages,
            pdf_name: conversation.pdf_name,
            pdf_text: conversation.pdf_text,
            user_id: conversation.user_id,
            created_at: now,
            updated_at: now,
        };
        conversations.insert(stored.id.clone(), stored.clone());

        Ok(stored)
    }

    async fn fetch(&self, id: &str) -> Result<Option<models::Conversation>, StoreError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<models::ConversationSummary>, StoreError> {
        let conversations = self.conversations.read().await;
        let mut list: Vec<_> = conversations
            .values()
            .filter(|c| c.user_id == user_id)
            .map(|c| models::ConversationSummary {
                id: c.id.clone(),
                name: c.name.clone(),
                updated_at: c.updated_at,
            })
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(list)
    }

    async fn append_message(
        &self,
        id: &str,
        entry: models::MessageEntry,
    ) -> Result<models::Conversation, StoreError> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conversation.messages.push(entry);
        conversation.updated_at = Utc::now();

        Ok(conversation.clone())
    }

    async fn upsert_pdf(
        &self,
        id: &str,
        pdf_name: &str,
        pdf_text: &str,
    ) -> Result<models::Conversation, StoreError> {
        let mut conversations = self.conversations.write().await;
        let now = Utc::now();
        let conversation = conversations.entry(id.to_string()).or_insert_with(|| {
            let placeholder = models::NewConversation::pdf_only(id, pdf_name, pdf_text);
            models::Conversation {
                id: placeholder.id,
                name: placeholder.name,
                messages: placeholder.messages,
                pdf_name: None,
                pdf_text: None,
                user_id: placeholder.user_id,
                created_at: now,
                updated_at: now,
            }
        });
        conversation.pdf_name = Some(pdf_name.to_string());
        conversation.pdf_text = Some(pdf_text.to_string());
        conversation.updated_at = now;

        Ok(conversation.clone())
    }
}
