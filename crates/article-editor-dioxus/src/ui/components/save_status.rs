use dioxus::prelude::*;

#[component]
pub fn SaveStatus(last_saved: String) -> Element {
    rsx! {
        div {
            class: "save-status",
            "Last saved: "
            span { class: "last-saved", "{last_saved}" }
        }
    }
}
