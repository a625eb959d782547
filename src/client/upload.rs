use crate::client::api::ApiClient;
use crate::client::error::ClientError;
use std::fmt;

pub const STARTING_STATUS: &str = "Starting file processing...";
pub const EXTRACTED_STATUS: &str = "Complete!";
pub const FAILED_STATUS: &str = "Error processing PDF";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Idle,
    Processing { progress: u8, status: String },
    Complete,
    Failed(String),
}

/// "PDF attached" indicator of a conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfIndicator(pub Option<String>);

impl fmt::Display for PdfIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => write!(f, "PDF Uploaded: {}", name),
            None => write!(f, "No PDF Uploaded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Uploaded {
    pub file_name: String,
    pub characters: usize,
}

impl Uploaded {
    pub fn message(&self) -> String {
        format!("Extracted {} characters of text", self.characters)
    }

    pub fn indicator(&self) -> PdfIndicator {
        PdfIndicator(Some(self.file_name.clone()))
    }
}

/// Text of every page. A document the extractor cannot cope with is a
/// [`ClientError::Pdf`], including ones that make it panic.
pub fn extract_text(bytes: &[u8]) -> Result<String, ClientError> {
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|msg| msg.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unreadable document".to_string());
            ClientError::Pdf(reason)
        })?
        .map_err(|err| ClientError::Pdf(err.to_string()))
}

/// Drives one PDF attachment: extraction, then the upsert call. Every
/// status change is reported to the observer; the flow always ends at
/// [`UploadStatus::Idle`].
#[derive(Debug)]
pub struct UploadFlow {
    status: UploadStatus,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self {
            status: UploadStatus::Idle,
        }
    }
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    fn set<F: FnMut(&UploadStatus)>(&mut self, status: UploadStatus, on_change: &mut F) {
        self.status = status;
        on_change(&self.status);
    }

    pub async fn run<E, F>(
        &mut self,
        api: &ApiClient,
        conversation_id: &str,
        file_name: &str,
        extract: E,
        mut on_change: F,
    ) -> Result<Uploaded, ClientError>
    where
        E: FnOnce() -> Result<String, ClientError>,
        F: FnMut(&UploadStatus),
    {
        let result = self
            .process(api, conversation_id, file_name, extract, &mut on_change)
            .await;

        if let Err(err) = &result {
            tracing::error!("Error processing file: {}", err);
            self.set(UploadStatus::Failed(FAILED_STATUS.to_string()), &mut on_change);
        }
        self.set(UploadStatus::Idle, &mut on_change);

        result
    }

    async fn process<E, F>(
        &mut self,
        api: &ApiClient,
        conversation_id: &str,
        file_name: &str,
        extract: E,
        on_change: &mut F,
    ) -> Result<Uploaded, ClientError>
    where
        E: FnOnce() -> Result<String, ClientError>,
        F: FnMut(&UploadStatus),
    {
        self.set(
            UploadStatus::Processing {
                progress: 0,
                status: STARTING_STATUS.to_string(),
            },
            on_change,
        );

        let text = extract()?;
        self.set(
            UploadStatus::Processing {
                progress: 100,
                status: EXTRACTED_STATUS.to_string(),
            },
            on_change,
        );

        api.upload_pdf(conversation_id, file_name, &text).await?;
        self.set(UploadStatus::Complete, on_change);

        Ok(Uploaded {
            file_name: file_name.to_string(),
            characters: text.chars().count(),
        })
    }
}
