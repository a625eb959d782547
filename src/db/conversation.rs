use super::{ConversationStore, StoreError};
use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::Instrument;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(sqlx::FromRow)]
struct ConversationRow {
    id: String,
    name: String,
    user_id: String,
    messages: Json<Vec<models::MessageEntry>>,
    pdf_name: Option<String>,
    pdf_text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ConversationRow> for models::Conversation {
    fn from(row: ConversationRow) -> Self {
        models::Conversation {
            id: row.id,
            name: row.name,
            messages: row.messages.0,
            pdf_name: row.pdf_name,
            pdf_text: row.pdf_text,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `conversation` table access over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgConversationStore {
    pool: PgPool,
}

impl PgConversationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PgConversationStore {
    async fn insert(
        &self,
        conversation: models::NewConversation,
    ) -> Result<models::Conversation, StoreError> {
        let query_span = tracing::info_span!("Saving new conversation into the database");
        sqlx::query_as::<_, ConversationRow>(
            r#"
            INSERT INTO conversation (
                id,
                name,
                user_id,
                messages,
                pdf_name,
                pdf_text,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, name, user_id, messages, pdf_name, pdf_text, created_at, updated_at
            "#,
        )
        .bind(&conversation.id)
        .bind(&conversation.name)
        .bind(&conversation.user_id)
        .bind(Json(&conversation.messages))
        .bind(&conversation.pdf_name)
        .bind(&conversation.pdf_text)
        .fetch_one(&self.pool)
        .instrument(query_span)
        .await
        .map(Into::into)
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err)
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                StoreError::AlreadyExists(conversation.id.clone())
            }
            err => {
                tracing::error!("Failed to insert conversation: {:?}", err);
                StoreError::Database(err)
            }
        })
    }

    async fn fetch(&self, id: &str) -> Result<Option<models::Conversation>, StoreError> {
        let query_span = tracing::info_span!("Fetch conversation by id.");
        sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT id, name, user_id, messages, pdf_name, pdf_text, created_at, updated_at
            FROM conversation
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .instrument(query_span)
        .await
        .map(|row| row.map(Into::into))
        .map_err(|err| {
            tracing::error!("Failed to fetch conversation, error: {:?}", err);
            StoreError::Database(err)
        })
    }

    async fn list_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<models::ConversationSummary>, StoreError> {
        let query_span = tracing::info_span!("Fetch conversations by user id.");
        sqlx::query_as::<_, models::ConversationSummary>(
            r#"
            SELECT id, name, updated_at
            FROM conversation
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to list conversations, error: {:?}", err);
            StoreError::Database(err)
        })
    }

    async fn append_message(
        &self,
        id: &str,
        entry: models::MessageEntry,
    ) -> Result<models::Conversation, StoreError> {
        let query_span = tracing::info_span!("Appending message to conversation");
        // jsonb concatenation keeps concurrent appends from overwriting each other
        sqlx::query_as::<_, ConversationRow>(
            r#"
            UPDATE conversation
            SET
                messages = messages || jsonb_build_array($2::jsonb),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, user_id, messages, pdf_name, pdf_text, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(Json(&entry))
        .fetch_optional(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to append message: {:?}", err);
            StoreError::Database(err)
        })?
        .map(Into::into)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn upsert_pdf(
        &self,
        id: &str,
        pdf_name: &str,
        pdf_text: &str,
    ) -> Result<models::Conversation, StoreError> {
        let placeholder = models::NewConversation::pdf_only(id, pdf_name, pdf_text);
        let query_span = tracing::info_span!("Upserting conversation pdf");
        sqlx::query_as::<_, ConversationRow>(
            r#"
            INSERT INTO conversation (
                id,
                name,
                user_id,
                messages,
                pdf_name,
                pdf_text,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                pdf_name = EXCLUDED.pdf_name,
                pdf_text = EXCLUDED.pdf_text,
                updated_at = NOW()
            RETURNING id, name, user_id, messages, pdf_name, pdf_text, created_at, updated_at
            "#,
        )
        .bind(&placeholder.id)
        .bind(&placeholder.name)
        .bind(&placeholder.user_id)
        .bind(Json(&placeholder.messages))
        .bind(&placeholder.pdf_name)
        .bind(&placeholder.pdf_text)
        .fetch_one(&self.pool)
        .instrument(query_span)
        .await
        .map(Into::into)
        .map_err(|err| {
            tracing::error!("Failed to upsert conversation pdf: {:?}", err);
            StoreError::Database(err)
        })
    }
}
