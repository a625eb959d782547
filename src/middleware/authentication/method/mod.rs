mod f_anonym;
mod f_cookie;
mod f_oauth;

pub use f_anonym::anonym;
pub use f_cookie::try_cookie;
pub use f_oauth::{try_oauth, OAuthCache};
