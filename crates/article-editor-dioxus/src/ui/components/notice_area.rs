use article_editor_engine::session::Notice;
use dioxus::prelude::*;

/// Page-level notices, newest last. Renders nothing when there are none.
#[component]
pub fn NoticeArea(notices: Vec<Notice>) -> Element {
    if notices.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-area",
            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: if notice.kind.is_error() { "notice error" } else { "notice" },
                    "{notice.message}"
                }
            }
        }
    }
}
