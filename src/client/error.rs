use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No API key found!")]
    NoApiKey,
    #[error("Login required")]
    LoginRequired,
    /// Error answer from the backend, carrying its `message`
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("PDF parse error: {0}")]
    Pdf(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
