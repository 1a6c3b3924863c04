//! Image source selection for content forms.
//!
//! A form holds exactly one [`MediaSource`]. Bytes are only produced at
//! submission time: uploads already carry them, presets are fetched by the
//! client crate, and an unchanged edit omits the image field altogether.

use crate::error::AppError;

/// Upper bound for uploaded images. Files of this size or larger are refused.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// A default image bundled with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetImage {
    pub id: &'static str,
    pub label: &'static str,
    pub file_name: &'static str,
}

impl PresetImage {
    /// Path of the bundled asset, relative to the preset base URL.
    pub fn asset_path(&self) -> String {
        format!("presets/{}", self.file_name)
    }
}

/// Bundled presets in display order; the first is the default.
pub static PRESET_IMAGES: [PresetImage; 4] = [
    PresetImage {
        id: "calligraphy",
        label: "Calligraphy",
        file_name: "calligraphy.jpg",
    },
    PresetImage {
        id: "mosque",
        label: "Mosque",
        file_name: "mosque.jpg",
    },
    PresetImage {
        id: "quran",
        label: "Quran",
        file_name: "quran.png",
    },
    PresetImage {
        id: "lantern",
        label: "Lantern",
        file_name: "lantern.webp",
    },
];

pub fn default_preset() -> &'static PresetImage {
    &PRESET_IMAGES[0]
}

pub fn preset_by_id(id: &str) -> Option<&'static PresetImage> {
    PRESET_IMAGES.iter().find(|p| p.id == id)
}

/// A file picked from the user's machine.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Content type from the browser when present, otherwise guessed from the
/// file name.
pub fn resolve_content_type(file_name: &str, reported: Option<&str>) -> String {
    reported
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        })
}

/// Check an image upload before it touches form state.
pub fn validate_image(content_type: &str, size: u64, max_bytes: u64) -> Result<(), AppError> {
    if !content_type.starts_with("image/") {
        return Err(AppError::invalid_field("image", "Please choose an image file"));
    }
    if size >= max_bytes {
        let limit_mb = max_bytes / (1024 * 1024);
        return Err(AppError::invalid_field(
            "image",
            format!("Image must be smaller than {limit_mb} MB"),
        ));
    }
    Ok(())
}

/// Where the submitted image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource {
    Upload(LocalFile),
    Preset(String),
    /// Keep the server-stored image; the field is left out of the payload.
    Unchanged,
}

/// What the submission has to do about the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaPlan<'a> {
    Upload(&'a LocalFile),
    FetchPreset(&'static PresetImage),
    Omit,
}

/// Media state owned by one form instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSelection {
    source: MediaSource,
    existing_url: Option<String>,
    touched: bool,
    max_bytes: u64,
}

impl MediaSelection {
    /// Create flow: the default preset is preselected.
    pub fn for_create() -> Self {
        Self {
            source: MediaSource::Preset(default_preset().id.to_string()),
            existing_url: None,
            touched: false,
            max_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Edit flow: keep whatever the server has until told otherwise.
    pub fn for_edit() -> Self {
        Self {
            source: MediaSource::Unchanged,
            ..Self::for_create()
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    pub fn existing_url(&self) -> Option<&str> {
        self.existing_url.as_deref()
    }

    /// True once the user picked a file or a preset.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn active_preset(&self) -> Option<&'static PresetImage> {
        match &self.source {
            MediaSource::Preset(id) => preset_by_id(id),
            _ => None,
        }
    }

    pub fn pending_upload(&self) -> Option<&LocalFile> {
        match &self.source {
            MediaSource::Upload(file) => Some(file),
            _ => None,
        }
    }

    /// Select a preset, discarding any pending upload.
    pub fn select_preset(&mut self, id: &str) -> Result<(), AppError> {
        let preset = preset_by_id(id).ok_or_else(|| {
            AppError::invalid_field("image", format!("Unknown preset image: {id}"))
        })?;
        self.source = MediaSource::Preset(preset.id.to_string());
        self.touched = true;
        Ok(())
    }

    /// Check a picked file's type and size before its bytes are read.
    pub fn check_upload(&self, content_type: &str, size: u64) -> Result<(), AppError> {
        validate_image(content_type, size, self.max_bytes)
    }

    /// Select an uploaded file, clearing the active preset. An invalid file
    /// leaves the selection exactly as it was.
    pub fn select_upload(&mut self, file: LocalFile) -> Result<(), AppError> {
        validate_image(&file.content_type, file.size(), self.max_bytes)?;
        self.source = MediaSource::Upload(file);
        self.touched = true;
        Ok(())
    }

    /// Return to the server-stored image, if there is one.
    pub fn keep_existing(&mut self) -> bool {
        if self.existing_url.is_none() {
            return false;
        }
        self.source = MediaSource::Unchanged;
        self.touched = true;
        true
    }

    /// Apply the result of probing `GET /{entity}/image/{id}`.
    ///
    /// Ignored once the user has touched the media controls, so a late probe
    /// never overwrites their choice. Returns whether it was applied.
    pub fn apply_probe(&mut self, existing_url: Option<String>) -> bool {
        if self.touched {
            if existing_url.is_some() && self.existing_url.is_none() {
                self.existing_url = existing_url;
            }
            return false;
        }
        match existing_url {
            Some(url) => {
                self.existing_url = Some(url);
                self.source = MediaSource::Unchanged;
            }
            None => {
                self.existing_url = None;
                self.source = MediaSource::Preset(default_preset().id.to_string());
            }
        }
        true
    }

    /// Decide what the submission does about the image.
    pub fn plan(&self) -> Result<MediaPlan<'_>, AppError> {
        match &self.source {
            MediaSource::Upload(file) => {
                validate_image(&file.content_type, file.size(), self.max_bytes)?;
                Ok(MediaPlan::Upload(file))
            }
            MediaSource::Preset(id) => preset_by_id(id)
                .map(MediaPlan::FetchPreset)
                .ok_or_else(|| AppError::media_fetch(format!("Unknown preset image: {id}"))),
            MediaSource::Unchanged => Ok(MediaPlan::Omit),
        }
    }
}

/// Binary image ready to be attached to a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Label of the preset the bytes came from.
    pub preset_label: Option<String>,
}

impl ImagePayload {
    pub fn from_upload(file: &LocalFile) -> Self {
        Self {
            file_name: file.name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
            preset_label: None,
        }
    }

    /// Wrap fetched preset bytes. The MIME type follows the asset's
    /// extension, falling back to the served content type.
    pub fn from_preset(preset: &PresetImage, bytes: Vec<u8>, served_type: Option<&str>) -> Self {
        let guessed = mime_guess::from_path(preset.file_name).first();
        let content_type = match guessed {
            Some(mime) => mime.essence_str().to_string(),
            None => resolve_content_type(preset.file_name, served_type),
        };
        let file_name = if preset.file_name.contains('.') {
            preset.file_name.to_string()
        } else {
            let ext = mime_guess::get_mime_extensions_str(&content_type)
                .and_then(|exts| exts.first())
                .copied()
                .unwrap_or("bin");
            format!("{}.{}", preset.file_name, ext)
        };
        Self {
            file_name,
            content_type,
            bytes,
            preset_label: Some(preset.label.to_string()),
        }
    }
}

/// Outcome of media resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMedia {
    Attach(ImagePayload),
    Omit,
}

/// What the form currently previews.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Locally created preview of an upload (data or object URL).
    Local(String),
    /// URL of a bundled preset.
    Preset(String),
    /// Server-hosted image of the record being edited.
    Remote(String),
}

impl Preview {
    pub fn url(&self) -> &str {
        match self {
            Preview::Local(url) | Preview::Preset(url) | Preview::Remote(url) => url,
        }
    }

    /// Only locally created previews hold a resource that must be freed.
    pub fn needs_release(&self) -> bool {
        matches!(self, Preview::Local(_))
    }
}

/// Holds at most one preview. Replacing it hands back the previous one so
/// the owner can release it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewSlot {
    current: Option<Preview>,
}

impl PreviewSlot {
    pub fn current(&self) -> Option<&Preview> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn show(&mut self, preview: Preview) -> Option<Preview> {
        self.current.replace(preview)
    }

    #[must_use]
    pub fn clear(&mut self) -> Option<Preview> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppErrorKind;

    fn jpeg(size: usize) -> LocalFile {
        LocalFile {
            name: "cover.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn create_defaults_to_first_preset() {
        let media = MediaSelection::for_create();
        assert_eq!(media.active_preset(), Some(&PRESET_IMAGES[0]));
        assert_eq!(media.plan().unwrap(), MediaPlan::FetchPreset(&PRESET_IMAGES[0]));
    }

    #[test]
    fn at_most_one_preset_active_and_upload_cleared() {
        let mut media = MediaSelection::for_create();
        media.select_upload(jpeg(10)).unwrap();
        assert!(media.active_preset().is_none());

        for preset in PRESET_IMAGES.iter() {
            media.select_preset(preset.id).unwrap();
            assert_eq!(media.active_preset(), Some(preset));
            assert!(media.pending_upload().is_none());
        }
    }

    #[test]
    fn upload_clears_active_preset_but_not_catalog() {
        let mut media = MediaSelection::for_create();
        media.select_preset("quran").unwrap();
        media.select_upload(jpeg(1024)).unwrap();
        assert!(media.active_preset().is_none());
        assert_eq!(PRESET_IMAGES.len(), 4);
        assert!(matches!(media.plan().unwrap(), MediaPlan::Upload(f) if f.name == "cover.jpg"));
    }

    #[test]
    fn oversized_upload_rejected_without_state_change() {
        let mut media = MediaSelection::for_create();
        media.select_preset("mosque").unwrap();
        let before = media.clone();

        let err = media.select_upload(jpeg(MAX_IMAGE_BYTES as usize)).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(media, before);
    }

    #[test]
    fn non_image_upload_rejected() {
        let mut media = MediaSelection::for_create();
        let pdf = LocalFile {
            name: "notes.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        };
        assert!(media.select_upload(pdf).is_err());
        assert!(media.pending_upload().is_none());
    }

    #[test]
    fn edit_without_changes_omits_image() {
        let mut media = MediaSelection::for_edit();
        assert_eq!(media.plan().unwrap(), MediaPlan::Omit);
        assert!(media.apply_probe(Some("http://api/questions/image/1".into())));
        assert_eq!(media.plan().unwrap(), MediaPlan::Omit);
    }

    #[test]
    fn probe_without_image_falls_back_to_default_preset() {
        let mut media = MediaSelection::for_edit();
        media.apply_probe(None);
        assert_eq!(media.active_preset(), Some(default_preset()));
    }

    #[test]
    fn late_probe_does_not_override_user_choice() {
        let mut media = MediaSelection::for_edit();
        media.select_preset("lantern").unwrap();
        assert!(!media.apply_probe(Some("http://api/events/image/2".into())));
        assert_eq!(media.active_preset().map(|p| p.id), Some("lantern"));
        assert!(media.keep_existing());
        assert_eq!(media.plan().unwrap(), MediaPlan::Omit);
    }

    #[test]
    fn preset_payload_infers_type_from_extension() {
        let payload = ImagePayload::from_preset(
            &PRESET_IMAGES[3],
            vec![1, 2],
            Some("application/octet-stream"),
        );
        assert_eq!(payload.content_type, "image/webp");
        assert_eq!(payload.file_name, "lantern.webp");
        assert_eq!(payload.preset_label.as_deref(), Some("Lantern"));
    }

    #[test]
    fn content_type_guess_from_name() {
        assert_eq!(resolve_content_type("photo.png", None), "image/png");
        assert_eq!(resolve_content_type("photo.png", Some("image/jpeg")), "image/jpeg");
        assert_eq!(resolve_content_type("blob", Some(" ")), "application/octet-stream");
    }

    #[test]
    fn preview_slot_hands_back_superseded_preview() {
        let mut slot = PreviewSlot::default();
        assert_eq!(slot.show(Preview::Preset("/presets/mosque.jpg".into())), None);
        let old = slot.show(Preview::Local("data:image/png;base64,AA==".into()));
        assert_eq!(old, Some(Preview::Preset("/presets/mosque.jpg".into())));
        let released = slot.clear().unwrap();
        assert!(released.needs_release());
        assert!(slot.current().is_none());
    }

    #[test]
    fn upload_checked_from_metadata_alone() {
        let media = MediaSelection::for_create().with_max_bytes(1024);
        assert!(media.check_upload("image/png", 1023).is_ok());
        let err = media.check_upload("image/png", 3 * 1024 * 1024 * 1024).unwrap_err();
        assert!(err.field_errors.contains_key("image"));
        assert!(media.check_upload("application/pdf", 10).is_err());
        assert_eq!(media.active_preset(), Some(&PRESET_IMAGES[0]));
    }
}
