use base64::Engine as _;
use shared_types::{
    AppError, ImagePayload, MediaConfig, MediaPlan, MediaSelection, PresetImage, ResolvedMedia,
};

use crate::http::ApiClient;

// ── Trait ────────────────────────────────────────────────────────────

/// Source of preset image bytes.
#[allow(async_fn_in_trait)]
pub trait PresetStore: Send + Sync {
    /// Fetch a preset. Returns the bytes and the served content type, if any.
    async fn fetch(&self, preset: &PresetImage) -> Result<(Vec<u8>, Option<String>), AppError>;

    /// URL the UI can use to preview the preset.
    fn preview_url(&self, preset: &PresetImage) -> String;
}

// ── HTTP implementation ─────────────────────────────────────────────

/// Presets served from a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpPresetStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPresetStore {
    /// Shares the API client's connection pool and request timeout.
    pub fn new(api: &ApiClient, base_url: impl Into<String>) -> Self {
        Self {
            http: api.http().clone(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl PresetStore for HttpPresetStore {
    #[tracing::instrument(skip_all, fields(preset = preset.id))]
    async fn fetch(&self, preset: &PresetImage) -> Result<(Vec<u8>, Option<String>), AppError> {
        let url = self.preview_url(preset);
        let response = self.http.get(&url).send().await.map_err(|e| {
            AppError::media_fetch(format!("Could not load preset image \"{}\": {e}", preset.label))
        })?;
        if !response.status().is_success() {
            return Err(AppError::media_fetch(format!(
                "Could not load preset image \"{}\" (HTTP {})",
                preset.label,
                response.status().as_u16()
            )));
        }
        let served = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| {
            AppError::media_fetch(format!("Preset image \"{}\" was cut off: {e}", preset.label))
        })?;
        Ok((bytes.to_vec(), served))
    }

    fn preview_url(&self, preset: &PresetImage) -> String {
        format!("{}/{}", self.base_url, preset.asset_path())
    }
}

// ── Bundled implementation ──────────────────────────────────────────

/// Preset files compiled into the binary, keyed by file name.
static BUNDLED_PRESETS: [(&str, &[u8]); 4] = [
    ("calligraphy.jpg", include_bytes!("../assets/presets/calligraphy.jpg")),
    ("mosque.jpg", include_bytes!("../assets/presets/mosque.jpg")),
    ("quran.png", include_bytes!("../assets/presets/quran.png")),
    ("lantern.webp", include_bytes!("../assets/presets/lantern.webp")),
];

/// Presets shipped inside the application binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPresetStore;

impl BundledPresetStore {
    pub fn bytes(preset: &PresetImage) -> Option<&'static [u8]> {
        BUNDLED_PRESETS
            .iter()
            .find(|(name, _)| *name == preset.file_name)
            .map(|(_, bytes)| *bytes)
    }
}

impl PresetStore for BundledPresetStore {
    async fn fetch(&self, preset: &PresetImage) -> Result<(Vec<u8>, Option<String>), AppError> {
        Self::bytes(preset).map(|b| (b.to_vec(), None)).ok_or_else(|| {
            AppError::media_fetch(format!(
                "Preset image \"{}\" is not bundled with this build",
                preset.label
            ))
        })
    }

    /// Inline `data:` URL, so previews work without serving any files.
    fn preview_url(&self, preset: &PresetImage) -> String {
        let content_type = mime_guess::from_path(preset.file_name).first_or_octet_stream();
        let encoded = Self::bytes(preset)
            .map(|b| base64::engine::general_purpose::STANDARD.encode(b))
            .unwrap_or_default();
        format!("data:{content_type};base64,{encoded}")
    }
}

/// Either store, chosen from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredPresetStore {
    Http(HttpPresetStore),
    Bundled(BundledPresetStore),
}

impl ConfiguredPresetStore {
    pub fn from_config(api: &ApiClient, config: &MediaConfig) -> Self {
        match &config.preset_base_url {
            Some(url) => Self::Http(HttpPresetStore::new(api, url.clone())),
            None => Self::Bundled(BundledPresetStore),
        }
    }
}

impl PresetStore for ConfiguredPresetStore {
    async fn fetch(&self, preset: &PresetImage) -> Result<(Vec<u8>, Option<String>), AppError> {
        match self {
            Self::Http(store) => store.fetch(preset).await,
            Self::Bundled(store) => store.fetch(preset).await,
        }
    }

    fn preview_url(&self, preset: &PresetImage) -> String {
        match self {
            Self::Http(store) => store.preview_url(preset),
            Self::Bundled(store) => store.preview_url(preset),
        }
    }
}

/// Turn the form's media selection into what gets attached.
///
/// Uploads win, then presets (fetched now), otherwise the image field is
/// left out. Validation and preset failures block the submission.
#[tracing::instrument(skip_all)]
pub async fn resolve_media<S: PresetStore>(
    selection: &MediaSelection,
    store: &S,
) -> Result<ResolvedMedia, AppError> {
    match selection.plan()? {
        MediaPlan::Upload(file) => {
            tracing::debug!(file = %file.name, size = file.size(), "attaching upload");
            Ok(ResolvedMedia::Attach(ImagePayload::from_upload(file)))
        }
        MediaPlan::FetchPreset(preset) => {
            let (bytes, served) = store.fetch(preset).await?;
            if bytes.is_empty() {
                return Err(AppError::media_fetch(format!(
                    "Preset image \"{}\" is empty",
                    preset.label
                )));
            }
            tracing::debug!(preset = preset.id, size = bytes.len(), "attaching preset");
            Ok(ResolvedMedia::Attach(ImagePayload::from_preset(
                preset,
                bytes,
                served.as_deref(),
            )))
        }
        MediaPlan::Omit => Ok(ResolvedMedia::Omit),
    }
}
