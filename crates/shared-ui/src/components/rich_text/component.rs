use dioxus::prelude::*;
use shared_types::{apply_format, font_by_key, TextDirection, FONT_FAMILIES, TOOLBAR_FORMATS};

/// Rich-text field exposed as a `value` / `on_change` pair.
///
/// The source pane edits HTML directly; toolbar buttons append formatting
/// markup and the preview pane renders the result in the chosen font and
/// direction.
#[component]
pub fn RichTextEditor(
    value: String,
    on_change: EventHandler<String>,
    #[props(default = TextDirection::Ltr)] direction: TextDirection,
    font_key: String,
    on_font_change: EventHandler<String>,
    #[props(default)] label: String,
    #[props(default)] placeholder: String,
    #[props(default = false)] disabled: bool,
) -> Element {
    let mut show_preview = use_signal(|| false);
    let font_stack = font_by_key(&font_key)
        .or_else(|| FONT_FAMILIES.first())
        .map(|f| f.css_stack)
        .unwrap_or("sans-serif");
    let dir = direction.as_str();
    let current = value.clone();

    rsx! {
        div { class: "rich-text",
            if !label.is_empty() {
                label { class: "input-label", "{label}" }
            }
            div { class: "rich-text-toolbar", role: "toolbar",
                for format in TOOLBAR_FORMATS.iter().copied() {
                    button {
                        key: "{format.label()}",
                        class: "rich-text-tool",
                        r#type: "button",
                        disabled: disabled,
                        onclick: {
                            let current = current.clone();
                            move |_| on_change.call(apply_format(&current, format))
                        },
                        "{format.label()}"
                    }
                }
                select {
                    class: "form-select rich-text-font",
                    value: "{font_key}",
                    disabled: disabled,
                    onchange: move |evt: FormEvent| on_font_change.call(evt.value()),
                    for font in FONT_FAMILIES.iter() {
                        option { key: "{font.key}", value: "{font.key}", "{font.label}" }
                    }
                }
                button {
                    class: "rich-text-tool",
                    r#type: "button",
                    onclick: move |_| show_preview.toggle(),
                    if show_preview() { "Edit" } else { "Preview" }
                }
            }
            if show_preview() {
                div {
                    class: "rich-text-preview",
                    dir: "{dir}",
                    style: "font-family: {font_stack};",
                    dangerous_inner_html: "{value}",
                }
            } else {
                textarea {
                    class: "rich-text-source",
                    dir: "{dir}",
                    style: "font-family: {font_stack};",
                    placeholder: placeholder,
                    disabled: disabled,
                    value: "{value}",
                    oninput: move |evt: FormEvent| on_change.call(evt.value()),
                }
            }
        }
    }
}
