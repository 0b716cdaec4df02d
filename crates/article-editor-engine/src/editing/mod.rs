/*!
 * # Block Editing
 *
 * The editor keeps an explicit, in-memory list of blocks instead of treating
 * whatever the view currently renders as the article. The view renders from
 * this state and turns every event into a [`Cmd`]; saving reads the state
 * back through [`BlockEditor::serialize`].
 *
 * ```rust
 * use article_editor_engine::editing::{BlockEditor, Cmd};
 * use article_editor_engine::models::{Block, TextStyle};
 *
 * let mut editor = BlockEditor::default();
 * let patch = editor
 *     .apply(Cmd::AddTextBlock { style: TextStyle::H1, text: Some("Hello".into()) })
 *     .unwrap();
 * assert!(patch.persist);
 *
 * assert_eq!(editor.serialize(), vec![Block::text(TextStyle::H1, "Hello")]);
 * ```
 */

pub mod block;
pub mod commands;
pub mod editor;
pub mod patch;

pub use block::{BlockContent, BlockId, EditorBlock, ImageSlot};
pub use commands::Cmd;
pub use editor::{BlockEditor, DEFAULT_PLACEHOLDER, EditError};
pub use patch::Patch;
