use client::ApiClient;
use dioxus::prelude::*;
use shared_types::AppConfig;

mod auth;
mod components;
mod format_helpers;
mod routes;
use auth::{use_session, SessionState};
use routes::Route;

/// Backend access and configuration shared by every screen.
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub config: &'static AppConfig,
}

/// Hook to access the shared [`Services`].
pub fn use_services() -> Services {
    use_context::<Services>()
}

const APP_CSS: Asset = asset!("/assets/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = client::config::load();
    let api = use_hook(|| ApiClient::new(&config.api));

    // The client is built once, so this branch is stable across renders.
    let api = match api {
        Ok(api) => api,
        Err(err) => {
            tracing::error!(error = %err, "could not start the API client");
            return rsx! {
                document::Link { rel: "stylesheet", href: shared_ui::SHARED_UI_CSS }
                document::Link { rel: "stylesheet", href: APP_CSS }
                div { class: "auth-guard-loading",
                    p { "The admin panel could not start: {err.friendly_message()}" }
                }
            };
        }
    };

    use_context_provider(|| Services {
        api: api.clone(),
        config,
    });
    use_context_provider(SessionState::new);

    // Resolve the stored session; the shell stays in `loading` until then.
    let mut session = use_session();
    use_future(move || {
        let api = api.clone();
        async move {
            let user = client::auth::restore_session(&api).await;
            session.resolve(user);
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: shared_ui::SHARED_UI_CSS }
        document::Link { rel: "stylesheet", href: APP_CSS }
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
