//! Session resolution.
//!
//! Every request passes through [`Manager`]. A bearer token or an
//! `access_token` cookie is resolved to a [`crate::models::User`] through the
//! auth provider and stored in the request extensions as `Arc<User>`;
//! requests without credentials continue anonymously.

mod getheader;
mod manager;
mod manager_middleware;
mod method;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;
pub use method::OAuthCache;
