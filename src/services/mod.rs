pub mod chat;
pub mod completion;

pub use chat::{ChatError, ChatService};
pub use completion::{system_prompt, CompletionService};
