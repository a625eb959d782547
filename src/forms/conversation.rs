use serde::{Deserialize, Serialize};
use std::fmt;

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Raw body of the PDF upsert. Every field is optional here so that a
/// missing field and an empty one are rejected the same way.
#[derive(Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConversationForm {
    pub id: Option<String>,
    pub file_name: Option<String>,
    pub pdf_text: Option<String>,
}

impl fmt::Debug for UpdateConversationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateConversationForm")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("pdf_text_len", &self.pdf_text.as_ref().map(String::len))
            .finish()
    }
}

/// A validated PDF upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfAttachment {
    pub id: String,
    pub file_name: String,
    pub pdf_text: String,
}

impl TryFrom<UpdateConversationForm> for PdfAttachment {
    type Error = &'static str;

    fn try_from(form: UpdateConversationForm) -> Result<Self, Self::Error> {
        fn required(value: Option<String>) -> Result<String, &'static str> {
            value.filter(|v| !v.is_empty()).ok_or(MISSING_FIELDS)
        }

        Ok(PdfAttachment {
            id: required(form.id)?,
            file_name: required(form.file_name)?,
            pdf_text: required(form.pdf_text)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PdfNameQuery {
    pub id: Option<String>,
}
