use crate::editing::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Blocks added, removed or modified by the command
    pub changed: Vec<BlockId>,
    pub version: u64,
    /// The edit should be followed by a debounced save
    pub persist: bool,
}
