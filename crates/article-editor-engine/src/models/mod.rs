pub mod document;
pub mod wire;

pub use document::{Block, Document, ImageBlock, TextBlock, TextStyle};
pub use wire::{ApiStatus, ErrorBody, LoadResponse, SaveResponse, UploadResponse};
