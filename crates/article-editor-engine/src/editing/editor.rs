use crate::editing::{BlockContent, BlockId, Cmd, EditorBlock, ImageSlot, Patch};
use crate::models::{Block, TextStyle};

pub const DEFAULT_PLACEHOLDER: &str = "Write here...";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("No block with id {0}")]
    UnknownBlock(BlockId),
    #[error("Block {0} is not a text block")]
    NotText(BlockId),
    #[error("Block {0} is not an image block")]
    NotImage(BlockId),
}

/// In-memory model of the article body.
///
/// The editor is the single source of truth for the block list: the view
/// renders from [`blocks`](Self::blocks) and the save path reads
/// [`serialize`](Self::serialize). Block order in `blocks` is the visual
/// top-to-bottom order.
///
/// Text blocks carry a placeholder while empty. Focusing a block whose text
/// is the placeholder clears it; blurring a block left blank restores it.
/// Only one text block is focused at a time.
#[derive(Debug, Clone)]
pub struct BlockEditor {
    blocks: Vec<EditorBlock>,
    next_id: u64,
    focused: Option<BlockId>,
    placeholder: String,
    version: u64,
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

impl BlockEditor {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            blocks: Vec::new(),
            next_id: 1,
            focused: None,
            placeholder: placeholder.into(),
            version: 0,
        }
    }

    /// Build an editor showing `content`, in order, with nothing focused.
    pub fn from_content(content: &[Block], placeholder: impl Into<String>) -> Self {
        let mut editor = Self::new(placeholder);
        editor.append_content(content);
        editor
    }

    /// Append one rendered block per entry of a loaded document.
    ///
    /// Unlike [`add_text_block`](Self::add_text_block) this does not move
    /// focus, so loaded text is kept exactly as stored.
    pub fn append_content(&mut self, content: &[Block]) {
        for block in content {
            let content = match block {
                Block::Text(text) => BlockContent::Text {
                    style: text.style,
                    text: text.data.clone(),
                },
                Block::Image(image) => BlockContent::Image(ImageSlot::Ready(image.data.clone())),
            };
            self.push(content);
        }
        self.version += 1;
    }

    pub fn blocks(&self) -> &[EditorBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&EditorBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn focused(&self) -> Option<BlockId> {
        self.focused
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply one command and describe what changed.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let persist = cmd.persists();

        let changed = match cmd {
            Cmd::AddTextBlock { style, text } => vec![self.add_text_block(style, text)],
            Cmd::AddImageBlock { src } => vec![self.add_image_block(src)],
            Cmd::DeleteBlock { id } => {
                self.delete_block(id)?;
                vec![id]
            }
            Cmd::EditText { id, text } => {
                self.edit_text(id, text)?;
                vec![id]
            }
            Cmd::Focus { id } => self.focus(id)?,
            Cmd::Blur { id } => {
                self.blur(id)?;
                vec![id]
            }
            Cmd::BeginUpload { id } => {
                self.set_image_slot(id, ImageSlot::Uploading)?;
                vec![id]
            }
            Cmd::FinishUpload { id, url } => {
                self.set_image_slot(id, ImageSlot::Ready(url))?;
                vec![id]
            }
            Cmd::AbortUpload { id } => {
                self.set_image_slot(id, ImageSlot::Empty)?;
                vec![id]
            }
        };

        self.version += 1;

        Ok(Patch {
            changed,
            version: self.version,
            persist,
        })
    }

    /// Append a text block and focus it.
    ///
    /// Without `text` the block starts as the placeholder, which the focus
    /// immediately clears.
    pub fn add_text_block(&mut self, style: TextStyle, text: Option<String>) -> BlockId {
        let text = text.unwrap_or_else(|| self.placeholder.clone());
        let id = self.push(BlockContent::Text { style, text });
        // The block was just created as a text block, focusing cannot fail
        let _ = self.focus(id);
        id
    }

    /// Append an image block, either showing `src` or an empty drop zone.
    pub fn add_image_block(&mut self, src: Option<String>) -> BlockId {
        let slot = match src {
            Some(url) => ImageSlot::Ready(url),
            None => ImageSlot::Empty,
        };
        self.push(BlockContent::Image(slot))
    }

    pub fn delete_block(&mut self, id: BlockId) -> Result<(), EditError> {
        let index = self.index_of(id)?;
        self.blocks.remove(index);
        if self.focused == Some(id) {
            self.focused = None;
        }
        Ok(())
    }

    pub fn edit_text(&mut self, id: BlockId, new_text: String) -> Result<(), EditError> {
        let (_, text) = self.text_mut(id)?;
        *text = new_text;
        Ok(())
    }

    /// Focus a text block, blurring whichever block held focus before.
    /// Returns every block whose state changed.
    pub fn focus(&mut self, id: BlockId) -> Result<Vec<BlockId>, EditError> {
        // Validate before touching the previous focus
        self.text_mut(id)?;

        let mut changed = Vec::new();
        if let Some(previous) = self.focused
            && previous != id
        {
            self.blur(previous)?;
            changed.push(previous);
        }

        let placeholder = self.placeholder.clone();
        let (_, text) = self.text_mut(id)?;
        if *text == placeholder {
            text.clear();
        }
        self.focused = Some(id);
        changed.push(id);
        Ok(changed)
    }

    pub fn blur(&mut self, id: BlockId) -> Result<(), EditError> {
        let placeholder = self.placeholder.clone();
        let (_, text) = self.text_mut(id)?;
        if text.trim().is_empty() {
            *text = placeholder;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        Ok(())
    }

    /// Produce the saved form of the block list, in visual order.
    ///
    /// Image blocks still showing the drop zone are removed from the editor
    /// as well as from the output. Blocks with an upload in flight are left
    /// out of the output but kept so the upload can land.
    pub fn serialize(&mut self) -> Vec<Block> {
        let before = self.blocks.len();
        self.blocks
            .retain(|b| !matches!(b.content, BlockContent::Image(ImageSlot::Empty)));
        if self.blocks.len() != before {
            log::debug!("Dropped {} empty image block(s)", before - self.blocks.len());
            self.version += 1;
        }

        self.blocks
            .iter()
            .filter_map(|b| match &b.content {
                BlockContent::Text { style, text } => Some(Block::text(*style, text.clone())),
                BlockContent::Image(slot) => slot.url().map(Block::image),
            })
            .collect()
    }

    fn push(&mut self, content: BlockContent) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(EditorBlock { id, content });
        id
    }

    fn index_of(&self, id: BlockId) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or(EditError::UnknownBlock(id))
    }

    fn text_mut(&mut self, id: BlockId) -> Result<(TextStyle, &mut String), EditError> {
        let index = self.index_of(id)?;
        match &mut self.blocks[index].content {
            BlockContent::Text { style, text } => Ok((*style, text)),
            BlockContent::Image(_) => Err(EditError::NotText(id)),
        }
    }

    fn set_image_slot(&mut self, id: BlockId, slot: ImageSlot) -> Result<(), EditError> {
        let index = self.index_of(id)?;
        match &mut self.blocks[index].content {
            BlockContent::Image(current) => {
                *current = slot;
                Ok(())
            }
            BlockContent::Text { .. } => Err(EditError::NotImage(id)),
        }
    }
}
