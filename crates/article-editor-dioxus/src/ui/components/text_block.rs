use crate::ui::components::DeleteButton;
use article_editor_engine::editing::{BlockId, Cmd};
use article_editor_engine::models::TextStyle;
use dioxus::prelude::*;

/// Editable text block. Every DOM event becomes an editor command.
#[component]
pub fn TextBlockView(
    id: BlockId,
    style: TextStyle,
    text: String,
    focused: bool,
    on_command: Callback<Cmd>,
) -> Element {
    let class_name = format!("block-text style-{style}");

    rsx! {
        div {
            class: "block text-block",
            "data-type": "text",
            "data-style": "{style}",
            textarea {
                class: "{class_name}",
                value: "{text}",
                rows: calculate_rows(&text),
                autofocus: focused,
                oninput: move |event: Event<FormData>| {
                    on_command.call(Cmd::EditText { id, text: event.value() });
                },
                onfocus: move |_| on_command.call(Cmd::Focus { id }),
                onblur: move |_| on_command.call(Cmd::Blur { id }),
            }
            DeleteButton {
                on_click: move |_| on_command.call(Cmd::DeleteBlock { id })
            }
        }
    }
}

/// Grow the textarea with its content
fn calculate_rows(content: &str) -> u32 {
    let line_count = content.lines().count().max(1);
    (line_count as u32).min(20)
}
