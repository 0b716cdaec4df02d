use crate::ui::components::DeleteButton;
use article_editor_engine::editing::{BlockId, Cmd, ImageSlot};
use article_editor_engine::session::Notice;
use article_editor_engine::upload::{ACCEPTED_IMAGE_TYPES, ImageFile, mime_from_name};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

/// Image block: the picture once there is one, otherwise a drop zone that
/// also opens the file picker when clicked.
///
/// Picked files are handed over unread so their size can be checked first.
#[component]
pub fn ImageBlockView(
    id: BlockId,
    slot: ImageSlot,
    status: Option<Notice>,
    on_command: Callback<Cmd>,
    on_file: Callback<(BlockId, FileData)>,
) -> Element {
    let mut drag_over = use_signal(|| false);
    let accept = ACCEPTED_IMAGE_TYPES.join(", ");

    let pick = move |files: Vec<FileData>| {
        if let Some(file) = files.into_iter().next() {
            on_file.call((id, file));
        }
    };

    let body = match slot {
        ImageSlot::Ready(url) => rsx! {
            div {
                class: "image-container",
                img { src: "{url}", alt: "Uploaded image" }
            }
        },
        ImageSlot::Uploading => rsx! {
            div {
                class: "drop-zone uploading",
                div { class: "spinner" }
            }
        },
        ImageSlot::Empty => rsx! {
            label {
                class: if drag_over() { "drop-zone drag-over" } else { "drop-zone" },
                ondragover: move |event: Event<DragData>| {
                    event.prevent_default();
                    drag_over.set(true);
                },
                ondragleave: move |_| drag_over.set(false),
                ondrop: move |event: Event<DragData>| {
                    event.prevent_default();
                    drag_over.set(false);
                    pick(event.files());
                },
                div {
                    class: "drop-zone-body",
                    p { "Drag an image here" }
                    p { class: "drop-zone-or", "or" }
                    span { class: "choose-file", "Choose file" }
                }
                input {
                    r#type: "file",
                    accept: "{accept}",
                    style: "display: none",
                    onchange: move |event: Event<FormData>| pick(event.files()),
                }
            }
        },
    };

    rsx! {
        div {
            class: "block image-block",
            "data-type": "image",
            {body}
            if let Some(notice) = status {
                div {
                    class: if notice.kind.is_error() { "status-message error" } else { "status-message" },
                    "{notice.message}"
                }
            }
            DeleteButton {
                on_click: move |_| on_command.call(Cmd::DeleteBlock { id })
            }
        }
    }
}

/// Read a picked or dropped file into memory.
pub async fn read_image(file: FileData) -> Option<ImageFile> {
    let name = file.name();
    let mime = file
        .content_type()
        .filter(|mime| !mime.is_empty())
        .or_else(|| mime_from_name(&name).map(str::to_string))
        .unwrap_or_else(|| "application/octet-stream".to_string());

    match file.read_bytes().await {
        Ok(bytes) => Some(ImageFile::new(name, mime, bytes.to_vec())),
        Err(e) => {
            log::error!("Failed to read {name}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use article_editor_engine::editing::BlockEditor;
    use article_editor_engine::session::NoticeKind;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_block(harness: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(harness);
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_ready_image_renders_picture() {
        fn harness() -> Element {
            let mut editor = BlockEditor::default();
            let id = editor.add_image_block(Some("/static/uploads/cat.png".into()));
            rsx! {
                ImageBlockView {
                    id,
                    slot: ImageSlot::Ready("/static/uploads/cat.png".into()),
                    status: None,
                    on_command: move |_| {},
                    on_file: move |_| {}
                }
            }
        }

        let html = render_block(harness);

        assert!(html.contains("src=\"/static/uploads/cat.png\""));
        assert!(!html.contains("drop-zone"));
    }

    #[test]
    fn test_empty_image_renders_drop_zone() {
        fn harness() -> Element {
            let mut editor = BlockEditor::default();
            let id = editor.add_image_block(None);
            rsx! {
                ImageBlockView {
                    id,
                    slot: ImageSlot::Empty,
                    status: None,
                    on_command: move |_| {},
                    on_file: move |_| {}
                }
            }
        }

        let html = render_block(harness);

        assert!(html.contains("drop-zone"));
        assert!(html.contains("Drag an image here"));
        assert!(html.contains("image/jpeg, image/png, image/webp, image/gif"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_uploading_block_takes_no_files() {
        fn harness() -> Element {
            let mut editor = BlockEditor::default();
            let id = editor.add_image_block(None);
            rsx! {
                ImageBlockView {
                    id,
                    slot: ImageSlot::Uploading,
                    status: None,
                    on_command: move |_| {},
                    on_file: move |_| {}
                }
            }
        }

        let html = render_block(harness);

        assert!(html.contains("drop-zone uploading"));
        assert!(!html.contains("type=\"file\""));
        assert!(!html.contains("Drag an image here"));
    }

    #[test]
    fn test_upload_error_status() {
        fn harness() -> Element {
            let mut editor = BlockEditor::default();
            let id = editor.add_image_block(None);
            rsx! {
                ImageBlockView {
                    id,
                    slot: ImageSlot::Empty,
                    status: Some(Notice {
                        id: 1,
                        kind: NoticeKind::UploadFailed,
                        message: "Error: Invalid file format".into(),
                        block: Some(id),
                        expires_at: None,
                    }),
                    on_command: move |_| {},
                    on_file: move |_| {}
                }
            }
        }

        let html = render_block(harness);

        assert!(html.contains("status-message error"));
        assert!(html.contains("Error: Invalid file format"));
    }
}
