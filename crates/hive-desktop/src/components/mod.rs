//! UI Components
//!
//! Reusable UI components for the desktop application.

mod category_picker;
mod composer;
mod confirm_dialog;
mod note_card;
mod notice;
mod search_bar;
mod toolbar;

pub use category_picker::CategoryPicker;
pub use composer::Composer;
pub use confirm_dialog::ConfirmDialog;
pub use note_card::NoteCard;
pub use notice::NoticeBanner;
pub use search_bar::SearchBar;
pub use toolbar::Toolbar;
