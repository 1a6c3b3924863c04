use base64::Engine as _;
use dioxus::prelude::*;
use shared_types::{
    resolve_content_type, AppError, ContentForm, LocalFile, MediaSource, Preview, PreviewSlot,
    PRESET_IMAGES,
};
use shared_ui::{use_toast, ImagePreview};

/// Replace the shown preview, dropping the one it supersedes. The last
/// preview goes away with the form's signals on unmount.
pub fn show_preview(slot: &mut Signal<PreviewSlot>, preview: Preview) {
    let previous = slot.write().show(preview);
    drop_local_preview(previous);
}

/// Local previews are `data:` URLs, which own no browser object to revoke;
/// dropping the string frees them.
fn drop_local_preview(preview: Option<Preview>) {
    if let Some(old) = preview.filter(Preview::needs_release) {
        tracing::debug!(bytes = old.url().len(), "dropped local preview");
    }
}

fn preset_class(active: bool) -> &'static str {
    if active {
        "media-preset active"
    } else {
        "media-preset"
    }
}

fn image_message(err: AppError) -> String {
    err.field_errors.get("image").cloned().unwrap_or(err.message)
}

/// Inline `data:` URL for previewing an upload before it is sent.
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{encoded}")
}

/// Preset buttons, file picker and the single active preview.
///
/// `preset_urls` holds a preview URL per entry of [`PRESET_IMAGES`]. A
/// rejected file leaves the selection untouched and clears the file input.
#[component]
pub fn MediaPicker(
    form: Signal<ContentForm>,
    preview: Signal<PreviewSlot>,
    preset_urls: Vec<String>,
    #[props(default = false)] disabled: bool,
) -> Element {
    let mut form = form;
    let mut preview = preview;
    let mut toast = use_toast();
    let mut input_key = use_signal(|| 0u32);
    let mut image_error = use_signal(|| Option::<String>::None);

    let active_preset = form.read().media.active_preset().map(|p| p.id);
    let existing_url = form.read().media.existing_url().map(str::to_string);
    let keeping_existing = *form.read().media.source() == MediaSource::Unchanged;
    let upload_name = form.read().media.pending_upload().map(|f| f.name.clone());

    let mut reject = move |message: String| {
        toast.error(message.clone());
        image_error.set(Some(message));
        input_key += 1;
    };

    let handle_file = move |evt: FormEvent| async move {
        let files = evt.files();
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        let content_type = resolve_content_type(&name, file.content_type().as_deref());
        let checked = form.read().media.check_upload(&content_type, file.size());
        if let Err(e) = checked {
            tracing::debug!(file = %name, size = file.size(), "refused before reading");
            reject(image_message(e));
            return;
        }
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(_) => {
                tracing::warn!(file = %name, "could not read the chosen file");
                reject("Failed to read file.".to_string());
                return;
            }
        };
        let result = form.write().media.select_upload(LocalFile { name, content_type, bytes });
        match result {
            Ok(()) => {
                image_error.set(None);
                let url = form
                    .read()
                    .media
                    .pending_upload()
                    .map(|f| data_url(&f.content_type, &f.bytes));
                if let Some(url) = url {
                    show_preview(&mut preview, Preview::Local(url));
                }
            }
            Err(e) => reject(image_message(e)),
        }
    };

    rsx! {
        div { class: "media-picker",
            label { class: "input-label", "Image" }
            ImagePreview { preview: preview.read().current().cloned() }
            if let Some(name) = upload_name {
                p { class: "media-picker-upload", "Selected file: {name}" }
            }
            div { class: "media-picker-presets",
                for (preset, url) in PRESET_IMAGES.iter().zip(preset_urls.iter().cloned()) {
                    button {
                        key: "{preset.id}",
                        r#type: "button",
                        class: preset_class(active_preset == Some(preset.id)),
                        disabled,
                        onclick: {
                            let url = url.clone();
                            move |_| {
                            let selected = form.write().media.select_preset(preset.id);
                            match selected {
                                Ok(()) => {
                                    image_error.set(None);
                                    input_key += 1;
                                    show_preview(&mut preview, Preview::Preset(url.clone()));
                                }
                                Err(e) => toast.error(e.friendly_message()),
                            }
                            }
                        },
                        img { src: "{url}", alt: "{preset.label}" }
                        span { "{preset.label}" }
                    }
                }
                if let Some(url) = existing_url {
                    button {
                        r#type: "button",
                        class: preset_class(keeping_existing),
                        disabled,
                        onclick: move |_| {
                            if form.write().media.keep_existing() {
                                image_error.set(None);
                                input_key += 1;
                                show_preview(&mut preview, Preview::Remote(url.clone()));
                            }
                        },
                        span { "Keep current image" }
                    }
                }
            }
            input {
                key: "{input_key}",
                class: "media-picker-file",
                r#type: "file",
                accept: "image/*",
                disabled,
                onchange: handle_file,
            }
            if let Some(err) = image_error() {
                p { class: "input-error", "{err}" }
            }
        }
    }
}
