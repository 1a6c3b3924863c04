pub mod auth;
pub mod config;
pub mod content;
pub mod error_convert;
pub mod http;
pub mod media;
pub mod reference;
pub mod submit;

pub use http::ApiClient;
