use async_trait::async_trait;

use crate::models::Document;
use crate::upload::ImageFile;

pub mod http;

pub use http::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Invalid backend URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server responded with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("Server reported an error: {0}")]
    Application(String),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Upload response is missing filePath")]
    MissingFilePath,
}

impl BackendError {
    /// The server's own explanation, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Application(message) => Some(message),
            BackendError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// The three endpoints the editor talks to.
///
/// Implementations report every failure mode (transport, HTTP status,
/// `status: "error"` payloads) as a [`BackendError`]; callers log it and
/// carry on.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /load`
    async fn load(&self) -> Result<Document, BackendError>;

    /// `POST /save`
    async fn save(&self, document: &Document) -> Result<(), BackendError>;

    /// `POST /upload-image`, returning the URL the image is served from
    async fn upload_image(&self, file: &ImageFile) -> Result<String, BackendError>;
}
