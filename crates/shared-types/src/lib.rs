pub mod error;

// Content entry
pub mod content;
pub mod editor;
pub mod form;
pub mod language;
pub mod media;
pub mod reference;
pub mod slug;

// Shell, lists and settings
pub mod common;
pub mod config;
pub mod listing;
pub mod resource;
pub mod session;

pub use error::*;

pub use common::*;
pub use config::*;
pub use content::*;
pub use editor::*;
pub use form::*;
pub use language::*;
pub use listing::*;
pub use media::*;
pub use reference::*;
pub use resource::*;
pub use session::*;
pub use slug::*;
