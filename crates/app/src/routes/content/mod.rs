pub mod form;
pub mod language_block;
pub mod list;
pub mod media_picker;
