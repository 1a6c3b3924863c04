pub mod alert_dialog;
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod form_select;
pub mod image_preview;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod progress;
pub mod rich_text;
pub mod search_bar;
pub mod toast;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use form_select::*;
pub use image_preview::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use progress::*;
pub use rich_text::*;
pub use search_bar::*;
pub use toast::*;
