use dioxus::prelude::*;
use shared_types::{nav_items_for, NavItem, NavTarget, Role};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageTitle};

use crate::auth::use_session;
use crate::format_helpers::greeting;
use crate::routes::Route;

/// Sections a role can jump to from the dashboard. The dashboard itself is
/// left out.
fn shortcuts(role: Role) -> Vec<&'static NavItem> {
    nav_items_for(role)
        .into_iter()
        .filter(|item| item.target != NavTarget::Dashboard)
        .collect()
}

fn describe(target: NavTarget) -> &'static str {
    match target {
        NavTarget::Dashboard => "",
        NavTarget::Content(_) => "Create, edit and publish multilingual entries.",
        NavTarget::Resource(_) => "Browse and remove records.",
    }
}

/// Landing screen after sign-in.
#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let Some(role) = session.role() else {
        return rsx! {};
    };
    let name = session
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    let hello = greeting(chrono::Local::now());

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{hello}, {name}" }
            }
            p { class: "dashboard-role", "Signed in as {role.label()}" }

            div { class: "dashboard-grid",
                for item in shortcuts(role) {
                    Link {
                        key: "{item.label}",
                        to: Route::for_target(item.target),
                        class: "dashboard-card-link",
                        Card {
                            CardHeader {
                                CardTitle { "{item.label}" }
                                CardDescription { "{describe(item.target)}" }
                            }
                            CardContent {
                                span { class: "dashboard-card-open", "Open" }
                            }
                        }
                    }
                }
            }
        }
    }
}
