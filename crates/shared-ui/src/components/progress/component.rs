use dioxus::prelude::*;

/// Horizontal progress bar for uploads, 0 to 100.
#[component]
pub fn ProgressBar(value: u8, #[props(default)] label: String) -> Element {
    let value = value.min(100);
    rsx! {
        div {
            class: "progress",
            role: "progressbar",
            "aria-valuemin": "0",
            "aria-valuemax": "100",
            "aria-valuenow": "{value}",
            div { class: "progress-indicator", style: "width: {value}%;" }
        }
        if !label.is_empty() {
            p { class: "progress-label", "{label} {value}%" }
        }
    }
}
