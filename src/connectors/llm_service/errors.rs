use thiserror::Error;

/// Errors that can occur while talking to the LLM provider.
///
/// The `Display` output is what callers see, so it carries the provider's
/// own message whenever there is one.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The API key can't be sent as a header value
    #[error("Invalid API key format")]
    InvalidApiKey,
    /// The HTTP client couldn't be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
    /// Transport failure (connect, timeout, body read)
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx answer from the provider
    #[error("{status} {body}")]
    Api { status: u16, body: String },
    /// 2xx answer without a usable first choice
    #[error("No content in response")]
    EmptyResponse,
}
