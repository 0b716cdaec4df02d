use crate::ui::components::StyleMenu;
use article_editor_engine::models::TextStyle;
use dioxus::prelude::*;

/// Buttons for adding blocks and saving.
///
/// The style menu is owned by the parent so a click anywhere else on the
/// page can close it.
#[component]
pub fn Toolbar(
    menu_open: bool,
    on_toggle_menu: Callback<()>,
    on_add_text: Callback<TextStyle>,
    on_add_image: Callback<()>,
    on_save: Callback<()>,
) -> Element {
    rsx! {
        div {
            class: "toolbar",
            div {
                class: "add-text-wrapper",
                button {
                    class: "toolbar-button add-text",
                    onclick: move |event: Event<MouseData>| {
                        event.stop_propagation();
                        on_toggle_menu.call(());
                    },
                    "Add text block"
                }
                if menu_open {
                    StyleMenu { on_pick: on_add_text }
                }
            }
            button {
                class: "toolbar-button add-image",
                onclick: move |_| on_add_image.call(()),
                "Add image block"
            }
            button {
                class: "toolbar-button save",
                onclick: move |_| on_save.call(()),
                "Save"
            }
        }
    }
}
