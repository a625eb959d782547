use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name given to conversations created by a PDF upload for an unknown id.
pub const DEFAULT_CONVERSATION_NAME: &str = "Default Name";
/// Owner given to conversations created by a PDF upload for an unknown id.
pub const DEFAULT_USER_ID: &str = "defaultUserId";

/// One question/answer turn. Written once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub messages: Vec<MessageEntry>,
    pub pdf_name: Option<String>,
    pub pdf_text: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Text handed to the model as answering context; empty when no PDF is attached.
    pub fn context(&self) -> &str {
        self.pdf_text.as_deref().unwrap_or("")
    }
}

/// Fields needed to create a conversation; timestamps are set by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversation {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub messages: Vec<MessageEntry>,
    pub pdf_name: Option<String>,
    pub pdf_text: Option<String>,
}

impl NewConversation {
    /// A conversation opened by its first question.
    pub fn first_turn(user_id: &str, entry: MessageEntry) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: entry.question.clone(),
            user_id: user_id.to_string(),
            messages: vec![entry],
            pdf_name: None,
            pdf_text: None,
        }
    }

    /// A placeholder conversation carrying only an attached PDF.
    pub fn pdf_only(id: &str, pdf_name: &str, pdf_text: &str) -> Self {
        Self {
            id: id.to_string(),
            name: DEFAULT_CONVERSATION_NAME.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            messages: vec![],
            pdf_name: Some(pdf_name.to_string()),
            pdf_text: Some(pdf_text.to_string()),
        }
    }
}

/// Row of the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(question: &str) -> MessageEntry {
        MessageEntry {
            id: "abcd1234".to_string(),
            question: question.to_string(),
            answer: "42".to_string(),
        }
    }

    #[test]
    fn first_turn_is_named_after_the_question() {
        let conversation = NewConversation::first_turn("user-1", entry("Summarize this"));

        assert_eq!(conversation.name, "Summarize this");
        assert_eq!(conversation.user_id, "user-1");
        assert_eq!(conversation.messages, vec![entry("Summarize this")]);
        assert!(uuid::Uuid::parse_str(&conversation.id).is_ok());
    }

    #[test]
    fn pdf_only_uses_placeholders() {
        let conversation = NewConversation::pdf_only("c1", "doc.pdf", "Alpha Beta");

        assert_eq!(conversation.name, DEFAULT_CONVERSATION_NAME);
        assert_eq!(conversation.user_id, DEFAULT_USER_ID);
        assert!(conversation.messages.is_empty());
        assert_eq!(conversation.pdf_text.as_deref(), Some("Alpha Beta"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let now = Utc::now();
        let conversation = Conversation {
            id: "c1".to_string(),
            name: "n".to_string(),
            messages: vec![entry("q")],
            pdf_name: Some("doc.pdf".to_string()),
            pdf_text: None,
            user_id: "u".to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&conversation).unwrap();
        assert_eq!(value["pdfName"], json!("doc.pdf"));
        assert_eq!(value["pdfText"], json!(null));
        assert_eq!(value["userId"], json!("u"));
        assert_eq!(
            value["messages"],
            json!([{ "id": "abcd1234", "question": "q", "answer": "42" }])
        );
        assert_eq!(conversation.context(), "");
    }
}
