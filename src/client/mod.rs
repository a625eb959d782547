//! Client side of the chat application.
//!
//! [`api::ApiClient`] talks to the HTTP backend, [`state::ChatView`] keeps the
//! optimistic message list consistent with the server, and [`upload`] drives
//! PDF text extraction and attachment. The `pdfchat` binary is a thin
//! terminal front end over these.

pub mod api;
pub mod error;
pub mod progress;
pub mod state;
pub mod upload;

pub use api::{ApiClient, ConversationPage};
pub use error::ClientError;
pub use state::{ChatView, Entry, EntryState};
pub use upload::{PdfIndicator, UploadFlow, UploadStatus};
