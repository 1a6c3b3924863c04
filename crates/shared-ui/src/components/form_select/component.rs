use dioxus::prelude::*;

/// A themed native select element for forms and filters.
///
/// Children should be `option { value: "...", "Label" }` elements.
#[component]
pub fn FormSelect(
    /// Current selected value.
    #[props(default)]
    value: String,
    /// Called when the selection changes.
    #[props(default)]
    onchange: Option<EventHandler<Event<FormData>>>,
    /// Optional label displayed above the select.
    #[props(default)]
    label: String,
    #[props(default = false)]
    disabled: bool,
    #[props(default = false)]
    required: bool,
    #[props(default)]
    error: Option<String>,
    /// Option elements to render inside the select.
    children: Element,
) -> Element {
    rsx! {
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label",
                    "{label}"
                    if required {
                        span { class: "input-required", " *" }
                    }
                }
            }
            select {
                class: "form-select",
                value: value,
                disabled: disabled,
                "aria-invalid": if error.is_some() { "true" } else { "false" },
                onchange: move |evt| {
                    if let Some(handler) = &onchange {
                        handler.call(evt);
                    }
                },
                {children}
            }
            if let Some(ref message) = error {
                p { class: "input-error", "{message}" }
            }
        }
    }
}
