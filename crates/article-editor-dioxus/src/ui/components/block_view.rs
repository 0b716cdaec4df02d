use crate::ui::components::{ImageBlockView, TextBlockView};
use article_editor_engine::editing::{BlockContent, BlockId, Cmd, EditorBlock};
use article_editor_engine::session::Notice;
use dioxus::html::FileData;
use dioxus::prelude::*;

/// Render one editor block with the view for its kind.
#[component]
pub fn BlockView(
    block: EditorBlock,
    focused: bool,
    status: Option<Notice>,
    on_command: Callback<Cmd>,
    on_file: Callback<(BlockId, FileData)>,
) -> Element {
    let id = block.id;
    match block.content {
        BlockContent::Text { style, text } => rsx! {
            TextBlockView { id, style, text, focused, on_command }
        },
        BlockContent::Image(slot) => rsx! {
            ImageBlockView { id, slot, status, on_command, on_file }
        },
    }
}
