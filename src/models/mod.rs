mod conversation;
mod user;

pub use conversation::*;
pub use user::*;
