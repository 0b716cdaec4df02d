//! Editor session: the block editor plus everything around it that talks to
//! the backend.
//!
//! Each network operation comes in two synchronous halves (`begin_*` and
//! `finish_*`) so a UI can drop its borrow of the session while the request
//! is in flight. The async methods (`load`, `save`, ...) join the halves for
//! callers that can hold `&mut self` across the await.

use chrono::SecondsFormat;
use std::time::Duration;

use crate::editing::{
    BlockContent, BlockEditor, BlockId, Cmd, DEFAULT_PLACEHOLDER, EditError, ImageSlot, Patch,
};
use crate::io::{Backend, BackendError};
use crate::models::Document;
use crate::scheduling::{Clock, DEFAULT_AUTOSAVE_DELAY, Debouncer, SystemClock};
use crate::upload::{ImageFile, MAX_UPLOAD_BYTES, UploadError, check_size};

pub mod notices;

pub use notices::{Notice, NoticeKind, Notices};

/// Title shown when the loaded article has none
pub const DEFAULT_TITLE: &str = "Article title";
/// Title saved and shown in the window when the title field is blank
pub const UNTITLED: &str = "Untitled";
pub const NEVER_SAVED: &str = "Never";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub autosave_delay: Duration,
    pub max_upload_bytes: u64,
    pub placeholder: String,
    pub save_notice: Duration,
    pub error_notice: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            save_notice: Duration::from_secs(3),
            error_notice: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("Block {0} is already uploading an image")]
    UploadInProgress(BlockId),
}

/// A save that has been started: the document sent and its sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    pub seq: u64,
    pub document: Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Succeeded, but a newer save had already been confirmed
    Stale,
    Failed,
}

pub struct EditorSession<C: Clock = SystemClock> {
    editor: BlockEditor,
    title: String,
    last_saved: Option<String>,
    autosave: Debouncer<C>,
    notices: Notices,
    clock: C,
    settings: SessionSettings,
    loaded: bool,
    next_save_seq: u64,
    confirmed_save_seq: u64,
}

impl EditorSession<SystemClock> {
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock + Clone> EditorSession<C> {
    pub fn with_clock(settings: SessionSettings, clock: C) -> Self {
        Self {
            editor: BlockEditor::new(settings.placeholder.clone()),
            title: String::new(),
            last_saved: None,
            autosave: Debouncer::new(clock.clone(), settings.autosave_delay),
            notices: Notices::default(),
            clock,
            settings,
            loaded: false,
            next_save_seq: 0,
            confirmed_save_seq: 0,
        }
    }
}

impl<C: Clock> EditorSession<C> {
    pub fn editor(&self) -> &BlockEditor {
        &self.editor
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text for the window title
    pub fn page_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    pub fn last_saved(&self) -> Option<&str> {
        self.last_saved.as_deref()
    }

    pub fn last_saved_display(&self) -> &str {
        self.last_saved.as_deref().unwrap_or(NEVER_SAVED)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Apply an editor command, scheduling an autosave if it changed content.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let deleted = match &cmd {
            Cmd::DeleteBlock { id } => Some(*id),
            _ => None,
        };
        let patch = self.editor.apply(cmd)?;
        if let Some(id) = deleted {
            self.notices.clear_block(id);
        }
        if patch.persist {
            self.debounced_save();
        }
        Ok(patch)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.debounced_save();
    }

    /// Restart the autosave quiet period. Returns the delay before the save
    /// becomes due.
    pub fn debounced_save(&mut self) -> Duration {
        self.autosave.trigger()
    }

    /// Time until the pending autosave is due, if one is pending.
    pub fn pending_save_delay(&self) -> Option<Duration> {
        self.autosave.remaining()
    }

    // -- load --------------------------------------------------------------

    /// Mark the session as loading. Returns false if it already loaded once.
    pub fn begin_load(&mut self) -> bool {
        if self.loaded {
            log::warn!("Article already loaded, ignoring repeated load");
            return false;
        }
        self.loaded = true;
        true
    }

    pub fn finish_load(&mut self, result: Result<Document, BackendError>) {
        match result {
            Ok(document) => {
                self.title = if document.title.is_empty() {
                    DEFAULT_TITLE.to_string()
                } else {
                    document.title
                };
                self.last_saved = match document.last_saved.as_str() {
                    "" | NEVER_SAVED => None,
                    _ => Some(document.last_saved),
                };
                self.editor.append_content(&document.content);
                log::info!("Loaded article with {} block(s)", self.editor.len());
            }
            Err(e) => log::error!("Failed to load article: {e}"),
        }
    }

    pub async fn load<B: Backend + ?Sized>(&mut self, backend: &B) {
        if self.begin_load() {
            let result = backend.load().await;
            self.finish_load(result);
        }
    }

    // -- save --------------------------------------------------------------

    /// Serialize the current state into a save request.
    ///
    /// Supersedes any pending autosave. Empty image blocks are removed from
    /// the editor as a side effect of serializing.
    pub fn begin_save(&mut self) -> SaveTicket {
        self.autosave.cancel();
        self.next_save_seq += 1;

        let title = match self.title.trim() {
            "" => UNTITLED.to_string(),
            trimmed => trimmed.to_string(),
        };
        let last_saved = self
            .clock
            .wall_clock()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        SaveTicket {
            seq: self.next_save_seq,
            document: Document {
                title,
                last_saved,
                content: self.editor.serialize(),
            },
        }
    }

    /// Record the backend's answer to a save.
    ///
    /// A response for a save older than one already confirmed is ignored so
    /// an out-of-order reply can't roll the "last saved" time back.
    pub fn finish_save(&mut self, ticket: &SaveTicket, result: Result<(), BackendError>) -> SaveOutcome {
        match result {
            Ok(()) if ticket.seq < self.confirmed_save_seq => {
                log::warn!(
                    "Ignoring response for save #{} after save #{} was confirmed",
                    ticket.seq,
                    self.confirmed_save_seq
                );
                SaveOutcome::Stale
            }
            Ok(()) => {
                self.confirmed_save_seq = ticket.seq;
                self.last_saved = Some(ticket.document.last_saved.clone());
                let expires_at = self.clock.now() + self.settings.save_notice;
                self.notices
                    .push(NoticeKind::Saved, "Changes saved", None, Some(expires_at));
                log::info!("Article saved at {}", ticket.document.last_saved);
                SaveOutcome::Saved
            }
            Err(e) => {
                log::error!("Failed to save article: {e}");
                SaveOutcome::Failed
            }
        }
    }

    pub async fn save<B: Backend + ?Sized>(&mut self, backend: &B) -> SaveOutcome {
        let ticket = self.begin_save();
        let result = backend.save(&ticket.document).await;
        self.finish_save(&ticket, result)
    }

    /// Start the autosave if its quiet period has elapsed.
    pub fn take_due_save(&mut self) -> Option<SaveTicket> {
        if self.autosave.take_due() {
            Some(self.begin_save())
        } else {
            None
        }
    }

    pub async fn flush_due_save<B: Backend + ?Sized>(&mut self, backend: &B) -> Option<SaveOutcome> {
        let ticket = self.take_due_save()?;
        let result = backend.save(&ticket.document).await;
        Some(self.finish_save(&ticket, result))
    }

    // -- image upload ------------------------------------------------------

    /// Check the reported size of a picked file before reading it.
    pub fn check_upload_size(&mut self, id: BlockId, size: u64) -> Result<(), SessionError> {
        check_size(size, self.settings.max_upload_bytes).map_err(|e| {
            log::warn!("Rejected {size} byte file for {id}: {e}");
            self.reject_upload(id, e)
        })
    }

    /// Validate `file` for image block `id` and mark the block as uploading.
    ///
    /// Oversized files raise a page notice and never reach the backend.
    pub fn begin_upload(&mut self, id: BlockId, file: &ImageFile) -> Result<(), SessionError> {
        if let Some(block) = self.editor.block(id)
            && block.content == BlockContent::Image(ImageSlot::Uploading)
        {
            log::warn!("Ignoring {file:?}, {id} is still uploading");
            return Err(SessionError::UploadInProgress(id));
        }
        if let Err(e) = file.validate(self.settings.max_upload_bytes) {
            log::warn!("Rejected {file:?}: {e}");
            return Err(self.reject_upload(id, e));
        }

        self.editor.apply(Cmd::BeginUpload { id })?;
        self.notices.clear_block(id);
        self.notices
            .push(NoticeKind::Uploading, "Uploading...", Some(id), None);
        Ok(())
    }

    fn reject_upload(&mut self, id: BlockId, e: UploadError) -> SessionError {
        match &e {
            UploadError::TooLarge { .. } => {
                let expires_at = self.clock.now() + self.settings.error_notice;
                self.notices
                    .push(NoticeKind::FileTooLarge, e.to_string(), None, Some(expires_at));
            }
            UploadError::UnsupportedType(_) => {
                self.notices.clear_block(id);
                self.notices
                    .push(NoticeKind::UploadFailed, format!("Error: {e}"), Some(id), None);
            }
        }
        e.into()
    }

    pub fn finish_upload(&mut self, id: BlockId, result: Result<String, BackendError>) {
        self.notices.clear_block(id);

        match result {
            Ok(url) => {
                if let Err(e) = self.apply(Cmd::FinishUpload { id, url }) {
                    log::warn!("Upload finished for a block that is gone: {e}");
                    return;
                }
                let expires_at = self.clock.now() + self.settings.error_notice;
                self.notices
                    .push(NoticeKind::Uploaded, "Image uploaded", Some(id), Some(expires_at));
            }
            Err(e) => {
                log::error!("Image upload failed: {e}");
                if self.editor.apply(Cmd::AbortUpload { id }).is_err() {
                    return;
                }
                let message = match e.server_message() {
                    Some(message) => format!("Error: {message}"),
                    None => "Upload failed".to_string(),
                };
                self.notices
                    .push(NoticeKind::UploadFailed, message, Some(id), None);
            }
        }
    }

    pub async fn upload_image<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        id: BlockId,
        file: &ImageFile,
    ) -> Result<(), SessionError> {
        self.begin_upload(id, file)?;
        let result = backend.upload_image(file).await;
        self.finish_upload(id, result);
        Ok(())
    }

    // -- notices -----------------------------------------------------------

    pub fn page_notices(&self) -> Vec<Notice> {
        self.notices.page(self.clock.now())
    }

    pub fn block_notice(&self, id: BlockId) -> Option<&Notice> {
        self.notices.for_block(id, self.clock.now())
    }

    /// Drop expired notices. Returns true if the view needs a redraw.
    pub fn prune_notices(&mut self) -> bool {
        self.notices.prune(self.clock.now())
    }

    /// Time until the next notice expires.
    pub fn next_notice_expiry(&self) -> Option<Duration> {
        self.notices
            .next_expiry()
            .map(|at| at.saturating_duration_since(self.clock.now()))
    }
}
