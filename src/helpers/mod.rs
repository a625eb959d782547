pub(crate) mod json;
pub mod random;

pub(crate) use json::*;
pub use random::generate_random_id;
