pub mod editing;
pub mod io;
pub mod models;
pub mod scheduling;
pub mod session;
pub mod upload;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BlockContent, BlockEditor, BlockId, Cmd, EditError, EditorBlock, ImageSlot, Patch};
pub use io::{Backend, BackendError, HttpBackend};
pub use models::{Block, Document, TextStyle};
pub use scheduling::{Clock, Debouncer, ManualClock, SystemClock};
pub use session::{
    EditorSession, Notice, NoticeKind, SaveOutcome, SaveTicket, SessionError, SessionSettings,
};
pub use upload::{ImageFile, UploadError};
