use std::time::Instant;

use crate::editing::BlockId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Save confirmation
    Saved,
    /// Picked file over the upload limit
    FileTooLarge,
    Uploading,
    Uploaded,
    UploadFailed,
}

impl NoticeKind {
    pub fn is_error(&self) -> bool {
        matches!(self, NoticeKind::FileTooLarge | NoticeKind::UploadFailed)
    }
}

/// A transient message for the user.
///
/// Notices scoped to a block render next to it; the rest go to the page's
/// notice area. A notice without `expires_at` stays until replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub block: Option<BlockId>,
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn is_active(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn push(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        block: Option<BlockId>,
        expires_at: Option<Instant>,
    ) -> u64 {
        self.next_id += 1;
        self.items.push(Notice {
            id: self.next_id,
            kind,
            message: message.into(),
            block,
            expires_at,
        });
        self.next_id
    }

    pub fn clear_block(&mut self, block: BlockId) {
        self.items.retain(|n| n.block != Some(block));
    }

    /// Drop expired notices. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.is_active(now));
        self.items.len() != before
    }

    /// Page-level notices still showing at `now`, oldest first.
    pub fn page(&self, now: Instant) -> Vec<Notice> {
        self.items
            .iter()
            .filter(|n| n.block.is_none() && n.is_active(now))
            .cloned()
            .collect()
    }

    /// The newest active notice attached to `block`.
    pub fn for_block(&self, block: BlockId, now: Instant) -> Option<&Notice> {
        self.items
            .iter()
            .rev()
            .find(|n| n.block == Some(block) && n.is_active(now))
    }

    /// Earliest expiry among pending notices.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.items.iter().filter_map(|n| n.expires_at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
