use dioxus::prelude::*;

#[component]
pub fn TitleField(title: String, on_input: Callback<String>) -> Element {
    rsx! {
        input {
            class: "title-input",
            r#type: "text",
            placeholder: "Article title",
            value: "{title}",
            oninput: move |event: Event<FormData>| on_input.call(event.value()),
        }
    }
}
