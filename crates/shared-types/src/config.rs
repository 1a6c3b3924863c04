use serde::{Deserialize, Serialize};

use crate::media::MAX_IMAGE_BYTES;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where preset images are served from and how large uploads may be.
///
/// A missing `preset_base_url` means presets are read from the local
/// `assets/presets` directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaConfig {
    #[serde(default)]
    pub preset_base_url: Option<String>,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            preset_base_url: None,
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

impl AppConfig {
    /// Apply environment overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        preset_base_url: Option<String>,
    ) -> Self {
        if let Some(url) = api_base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(url) = preset_base_url.filter(|u| !u.trim().is_empty()) {
            self.media.preset_base_url = Some(url);
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_image_bytes() -> u64 {
    MAX_IMAGE_BYTES
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
