use dioxus::prelude::*;
use shared_types::{default_font, ContentKind, ContentLanguage, LanguageBlock};
use shared_ui::{Input, RichTextEditor};

/// Title and body inputs for one language. Urdu renders right-to-left;
/// the editor font starts at the language's default.
#[component]
pub fn LanguageBlockEditor(
    kind: ContentKind,
    lang: ContentLanguage,
    block: LanguageBlock,
    on_title: EventHandler<String>,
    on_body: EventHandler<String>,
    #[props(default)] on_title_commit: EventHandler<()>,
    #[props(default = false)] disabled: bool,
) -> Element {
    let mut font_key = use_signal(|| default_font(lang).key.to_string());
    let (title_label, body_label) = kind.block_labels();
    let direction = lang.direction();

    rsx! {
        section {
            class: "language-block",
            "data-lang": lang.key(),
            dir: direction.as_str(),
            h3 { class: "language-block-title", "{lang.label()}" }
            Input {
                label: "{title_label} ({lang.label()})",
                value: block.title.clone(),
                dir: direction.as_str().to_string(),
                disabled,
                on_input: move |e: FormEvent| on_title.call(e.value()),
                on_change: move |_| on_title_commit.call(()),
            }
            RichTextEditor {
                label: "{body_label} ({lang.label()})",
                value: block.body.clone(),
                direction,
                font_key: font_key(),
                on_font_change: move |key: String| font_key.set(key),
                on_change: move |html: String| on_body.call(html),
                disabled,
            }
        }
    }
}
