//! Response envelopes of the `/load`, `/save` and `/upload-image` endpoints.

use serde::Deserialize;
use serde_json::Value;

use super::{Block, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// `GET /load`
///
/// Content entries stay untyped here so one unrecognised block does not
/// throw away the whole article.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_saved: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoadResponse {
    /// Convert a successful payload into a document, skipping blocks that
    /// don't decode.
    pub fn into_document(self) -> Document {
        let content = self
            .content
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Block>(value.clone()) {
                Ok(block) => Some(block),
                Err(e) => {
                    log::warn!("Skipping unrecognised block {value}: {e}");
                    None
                }
            })
            .collect();

        Document {
            title: self.title.unwrap_or_default(),
            last_saved: self.last_saved.unwrap_or_default(),
            content,
        }
    }
}

/// `POST /save`
#[derive(Debug, Clone, Deserialize)]
pub struct SaveResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /upload-image`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub status: ApiStatus,
    #[serde(rename = "filePath", default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body shape shared by every error reply, used to recover the server's
/// message from non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
