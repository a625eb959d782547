pub mod chat;
pub mod conversation;
pub mod user;

pub use chat::*;
pub use conversation::*;
pub use user::UserForm;
