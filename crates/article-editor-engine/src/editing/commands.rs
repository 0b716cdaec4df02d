use crate::editing::BlockId;
use crate::models::TextStyle;

/// Every user-driven change to the block list.
///
/// The UI never touches editor state directly; each event handler builds a
/// `Cmd` and hands it to [`BlockEditor::apply`](crate::editing::BlockEditor::apply).
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Append a text block; `None` starts it with the placeholder.
    AddTextBlock {
        style: TextStyle,
        text: Option<String>,
    },
    /// Append an image block; `None` starts with an empty drop zone.
    AddImageBlock { src: Option<String> },
    DeleteBlock { id: BlockId },
    /// Replace the whole text of a block (one `input` event)
    EditText { id: BlockId, text: String },
    Focus { id: BlockId },
    Blur { id: BlockId },
    BeginUpload { id: BlockId },
    FinishUpload { id: BlockId, url: String },
    /// Upload failed; the drop zone comes back
    AbortUpload { id: BlockId },
}

impl Cmd {
    /// Whether applying this command changes what would be saved.
    ///
    /// An image block without a picture is left out of saves, so adding one
    /// does not count.
    pub fn persists(&self) -> bool {
        match self {
            Cmd::AddImageBlock { src } => src.is_some(),
            Cmd::AddTextBlock { .. }
            | Cmd::DeleteBlock { .. }
            | Cmd::EditText { .. }
            | Cmd::FinishUpload { .. } => true,
            Cmd::Focus { .. } | Cmd::Blur { .. } | Cmd::BeginUpload { .. } | Cmd::AbortUpload { .. } => {
                false
            }
        }
    }
}
