use crate::models::TextStyle;
use std::fmt;

/// Stable identity of a block for the lifetime of one editor.
///
/// Ids are handed out in increasing order and never reused, so a UI can key
/// its elements on them and a late network callback can tell whether its
/// block still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) u64);

impl BlockId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// State of an image block's picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// Drop zone with the placeholder icon, nothing chosen yet
    Empty,
    /// A file was accepted and is being uploaded
    Uploading,
    /// Showing a real image
    Ready(String),
}

impl ImageSlot {
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSlot::Ready(url) => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text { style: TextStyle, text: String },
    Image(ImageSlot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBlock {
    pub id: BlockId,
    pub content: BlockContent,
}

impl EditorBlock {
    pub fn is_text(&self) -> bool {
        matches!(self.content, BlockContent::Text { .. })
    }

    pub fn is_image(&self) -> bool {
        matches!(self.content, BlockContent::Image(_))
    }
}
