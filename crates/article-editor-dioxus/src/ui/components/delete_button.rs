use dioxus::prelude::*;

#[component]
pub fn DeleteButton(on_click: Callback<()>) -> Element {
    rsx! {
        button {
            class: "delete-button",
            title: "Delete",
            onclick: move |_| on_click.call(()),
            "🗑"
        }
    }
}
