use dioxus::prelude::*;
use shared_types::Preview;

/// Shows the single active image preview, or a placeholder.
#[component]
pub fn ImagePreview(
    preview: Option<Preview>,
    #[props(default = "Selected image".to_string())] alt: String,
) -> Element {
    match preview {
        Some(p) => {
            let source = match &p {
                Preview::Local(_) => "upload",
                Preview::Preset(_) => "preset",
                Preview::Remote(_) => "current",
            };
            let url = p.url().to_string();
            rsx! {
                figure { class: "image-preview", "data-source": source,
                    img { src: "{url}", alt: "{alt}" }
                }
            }
        }
        None => rsx! {
            div { class: "image-preview empty", "No image selected" }
        },
    }
}
