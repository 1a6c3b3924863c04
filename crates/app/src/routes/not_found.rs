use dioxus::prelude::*;
use shared_ui::{Button, Card, CardContent};

use crate::routes::Route;

/// Catch-all for addresses outside the route table.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    tracing::debug!(%path, "unknown route");

    rsx! {
        div { class: "not-found-page",
            Card { class: "not-found-card",
                CardContent {
                    span { class: "not-found-code", "404" }
                    h1 { class: "not-found-title", "Nothing here" }
                    p { class: "not-found-message",
                        "No screen lives at "
                        code { "{path}" }
                        "."
                    }
                    Button {
                        onclick: move |_| {
                            navigator().replace(Route::Dashboard {});
                        },
                        "Back to Dashboard"
                    }
                }
            }
        }
    }
}
