//! Shared test helpers

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::io::{Backend, BackendError};
use crate::models::{Block, Document, TextStyle};
use crate::upload::ImageFile;

/// Wall-clock start for sessions driven by a `ManualClock`
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// The article from the `/load` example payload
pub fn example_document() -> Document {
    Document::new(
        "Hi",
        "2024-01-01T00:00:00Z",
        vec![Block::text(TextStyle::H1, "Hello")],
    )
}

/// In-memory backend that records what it was sent.
pub struct MockBackend {
    document: Option<Document>,
    fail_saves: AtomicBool,
    upload_error: Mutex<Option<String>>,
    load_calls: AtomicUsize,
    saved: Mutex<Vec<Document>>,
    uploads: Mutex<Vec<ImageFile>>,
}

impl MockBackend {
    pub fn with_document(document: Document) -> Self {
        Self::new(Some(document))
    }

    /// Every load answers with `status: "error"`
    pub fn failing() -> Self {
        Self::new(None)
    }

    fn new(document: Option<Document>) -> Self {
        Self {
            document,
            fail_saves: AtomicBool::new(false),
            upload_error: Mutex::new(None),
            load_calls: AtomicUsize::new(0),
            saved: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_uploads(&self, message: &str) {
        *self.upload_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Vec<Document> {
        self.saved.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn load(&self) -> Result<Document, BackendError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        self.document
            .clone()
            .ok_or_else(|| BackendError::Application("Error loading data".into()))
    }

    async fn save(&self, document: &Document) -> Result<(), BackendError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 500,
                message: Some("Error saving data".into()),
            });
        }
        self.saved.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn upload_image(&self, file: &ImageFile) -> Result<String, BackendError> {
        self.uploads.lock().unwrap().push(file.clone());
        if let Some(message) = self.upload_error.lock().unwrap().clone() {
            return Err(BackendError::Status {
                status: 400,
                message: Some(message),
            });
        }
        Ok(format!("/static/uploads/{}", file.name))
    }
}
