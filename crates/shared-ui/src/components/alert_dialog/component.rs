use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Modal asking the user to confirm a destructive action.
#[component]
pub fn ConfirmDialog(
    open: bool,
    title: String,
    message: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default = false)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    if !open {
        return rsx! {};
    }
    rsx! {
        div { class: "alert-dialog-overlay",
            div { class: "alert-dialog-content", role: "alertdialog",
                h2 { class: "alert-dialog-title", "{title}" }
                p { class: "alert-dialog-description", "{message}" }
                div { class: "alert-dialog-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}

/// Modal with a single dismiss button, used for submission errors.
#[component]
pub fn MessageDialog(
    open: bool,
    title: String,
    message: String,
    on_close: EventHandler<()>,
) -> Element {
    if !open {
        return rsx! {};
    }
    rsx! {
        div { class: "alert-dialog-overlay",
            div { class: "alert-dialog-content", role: "alertdialog",
                h2 { class: "alert-dialog-title", "{title}" }
                p { class: "alert-dialog-description", "{message}" }
                div { class: "alert-dialog-actions",
                    Button { onclick: move |_| on_close.call(()), "OK" }
                }
            }
        }
    }
}
