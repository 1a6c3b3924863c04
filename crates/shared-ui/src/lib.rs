//! Presentational components shared by the admin screens.

use dioxus::prelude::*;

pub mod components;

pub use components::*;

/// Stylesheet for every component in this crate. Link it once at the root.
pub const SHARED_UI_CSS: Asset = asset!("/assets/shared-ui.css");
