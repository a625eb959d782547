use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::fmt;

/// Body of "start a conversation" and "continue a conversation".
#[derive(Default, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(default)]
    #[validate(min_length = 1)]
    pub message: String,
    #[serde(default)]
    #[validate(min_length = 1)]
    pub api_key: String,
}

impl NewMessage {
    pub fn into_message(self, conversation_id: String) -> Message {
        Message {
            message: self.message,
            api_key: self.api_key,
            conversation_id,
        }
    }
}

impl fmt::Debug for NewMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewMessage")
            .field("message", &self.message)
            .field("api_key", &"****")
            .finish()
    }
}

/// A message addressed to an existing conversation.
#[derive(Clone, PartialEq)]
pub struct Message {
    pub message: String,
    pub api_key: String,
    pub conversation_id: String,
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("message", &self.message)
            .field("api_key", &"****")
            .field("conversation_id", &self.conversation_id)
            .finish()
    }
}
