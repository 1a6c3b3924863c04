use dioxus::prelude::*;

/// Labelled text input with an optional inline error.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    /// Fires when an edited value is committed, usually on blur.
    #[props(default)]
    on_change: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
    /// `ltr` or `rtl`.
    #[props(default = "ltr".to_string())]
    dir: String,
    #[props(default)] error: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let invalid = error.is_some();
    rsx! {
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label",
                    "{label}"
                    if required {
                        span { class: "input-required", " *" }
                    }
                }
            }
            input {
                class: "input",
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                dir: "{dir}",
                "aria-invalid": if invalid { "true" } else { "false" },
                oninput: move |evt| on_input.call(evt),
                onchange: move |evt| on_change.call(evt),
                ..attributes,
            }
            if let Some(message) = error {
                p { class: "input-error", "{message}" }
            }
        }
    }
}
