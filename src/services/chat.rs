use crate::connectors::LlmError;
use crate::db::{ConversationStore, StoreError};
use crate::forms;
use crate::helpers::generate_random_id;
use crate::models;
use crate::services::CompletionService;
use std::sync::Arc;
use thiserror::Error;

/// Length of the identifier given to each message entry.
pub const MESSAGE_ID_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Completion(#[from] LlmError),
    #[error("Conversation not found")]
    ConversationNotFound,
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// The two chat actions: open a conversation with a first question, or add
/// a question to an existing one.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    completion: Arc<CompletionService>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ConversationStore>, completion: Arc<CompletionService>) -> Self {
        Self { store, completion }
    }

    /// Returns the id of the created conversation.
    #[tracing::instrument(name = "Start conversation.", skip(self, form))]
    pub async fn new_chat(
        &self,
        user_id: &str,
        form: forms::NewMessage,
    ) -> Result<String, ChatError> {
        let answer = self
            .completion
            .complete(&form.api_key, &form.message, None)
            .await?;

        let entry = models::MessageEntry {
            id: generate_random_id(MESSAGE_ID_LEN),
            question: form.message,
            answer,
        };

        let conversation = self
            .store
            .insert(models::NewConversation::first_turn(user_id, entry))
            .await?;
        tracing::info!(conversation_id = %conversation.id, "Conversation created");

        Ok(conversation.id)
    }

    #[tracing::instrument(
        name = "Continue conversation.",
        skip(self, form),
        fields(conversation_id = %form.conversation_id)
    )]
    pub async fn chat(&self, form: forms::Message) -> Result<(), ChatError> {
        let conversation = self
            .store
            .fetch(&form.conversation_id)
            .await?
            .ok_or(ChatError::ConversationNotFound)?;

        let answer = self
            .completion
            .complete(&form.api_key, &form.message, Some(conversation.context()))
            .await?;

        let entry = models::MessageEntry {
            id: generate_random_id(MESSAGE_ID_LEN),
            question: form.message,
            answer,
        };

        let updated = self
            .store
            .append_message(&form.conversation_id, entry)
            .await
            .map_err(|err| match err {
                StoreError::NotFound(_) => ChatError::ConversationNotFound,
                err => ChatError::Store(err),
            })?;
        tracing::info!(messages = updated.messages.len(), "Message appended");

        Ok(())
    }
}
