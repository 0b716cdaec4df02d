pub mod block_view;
pub mod delete_button;
pub mod error_screen;
pub mod image_block;
pub mod notice_area;
pub mod save_status;
pub mod style_menu;
pub mod text_block;
pub mod title_field;
pub mod toolbar;

pub use block_view::BlockView;
pub use delete_button::DeleteButton;
pub use error_screen::ErrorScreen;
pub use image_block::ImageBlockView;
pub use notice_area::NoticeArea;
pub use save_status::SaveStatus;
pub use style_menu::StyleMenu;
pub use text_block::TextBlockView;
pub use title_field::TitleField;
pub use toolbar::Toolbar;
