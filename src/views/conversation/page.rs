use crate::models;
use serde::Serialize;

/// What the conversation page renders: the message history and the name of
/// the attached PDF. The extracted text and owner stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    pub messages: Vec<models::MessageEntry>,
    pub pdf_name: Option<String>,
}

impl From<models::Conversation> for Page {
    fn from(conversation: models::Conversation) -> Self {
        Self {
            id: conversation.id,
            name: conversation.name,
            messages: conversation.messages,
            pdf_name: conversation.pdf_name,
        }
    }
}
