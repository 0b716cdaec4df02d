use article_editor_engine::models::TextStyle;
use dioxus::prelude::*;

/// Drop-down offering one entry per text style.
#[component]
pub fn StyleMenu(on_pick: Callback<TextStyle>) -> Element {
    rsx! {
        div {
            class: "style-menu",
            for style in TextStyle::ALL {
                button {
                    key: "{style}",
                    class: "style-option",
                    "data-style": "{style}",
                    onclick: move |event: Event<MouseData>| {
                        event.stop_propagation();
                        on_pick.call(style);
                    },
                    "{style.label()}"
                }
            }
        }
    }
}
