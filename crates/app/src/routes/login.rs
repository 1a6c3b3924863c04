use crate::auth::use_session;
use crate::routes::Route;
use crate::use_services;
use dioxus::prelude::*;
use shared_types::{LoginRequest, ShellState};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, Input};
use std::collections::BTreeMap;

/// Email and password sign-in. Already signed-in users go straight to the
/// dashboard.
#[component]
pub fn Login() -> Element {
    let mut session = use_session();
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(BTreeMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    if matches!(session.shell_state(), ShellState::Authenticated(_)) {
        navigator().replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        let api = services.api.clone();
        async move {
            evt.prevent_default();
            if loading() {
                return;
            }
            loading.set(true);
            error_msg.set(None);
            field_errors.set(BTreeMap::new());

            let request = LoginRequest {
                email: email().trim().to_string(),
                password: password(),
            };
            match client::auth::sign_in(&api, &request).await {
                Ok(user) => {
                    session.set_user(user);
                    navigator().replace(Route::Dashboard {});
                }
                Err(e) if e.is_validation() => field_errors.set(e.field_errors.clone()),
                Err(e) => error_msg.set(Some(e.friendly_message())),
            }
            loading.set(false);
        }
    };

    rsx! {
        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your credentials to manage content" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", "{err}" }
                    }

                    form { class: "auth-form", onsubmit: handle_login,
                        Input {
                            label: "Email",
                            input_type: "email",
                            placeholder: "you@example.com",
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                            error: field_errors.read().get("email").cloned(),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                            error: field_errors.read().get("password").cloned(),
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            "data-style": "primary",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }
            }
        }
    }
}
