pub mod content;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod resources;

use crate::auth::use_session;
use crate::use_services;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBook, LdCalendar, LdFileText, LdImage, LdLanguages, LdLayoutDashboard, LdLogOut,
    LdMessageCircle, LdMessageSquare, LdPenTool, LdTag, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{
    can_access, nav_items_for, ContentKind, NavTarget, ResourceKind, Role, ShellState,
};

use content::form::ContentFormPage;
use content::list::ContentListPage;
use dashboard::Dashboard;
use login::Login;
use not_found::NotFound;
use resources::ResourceListPage;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Dashboard {},
    #[route("/content/:kind")]
    ContentList { kind: ContentKind },
    #[route("/content/:kind/new")]
    ContentCreate { kind: ContentKind },
    #[route("/content/:kind/:id")]
    ContentEdit { kind: ContentKind, id: String },
    #[route("/manage/:resource")]
    ResourceList { resource: ResourceKind },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Route a navigation entry points at.
    pub fn for_target(target: NavTarget) -> Self {
        match target {
            NavTarget::Dashboard => Route::Dashboard {},
            NavTarget::Content(kind) => Route::ContentList { kind },
            NavTarget::Resource(resource) => Route::ResourceList { resource },
        }
    }

    /// Navigation entry a route belongs to, `None` for routes outside the shell.
    pub fn nav_target(&self) -> Option<NavTarget> {
        match self {
            Route::Dashboard {} => Some(NavTarget::Dashboard),
            Route::ContentList { kind }
            | Route::ContentCreate { kind }
            | Route::ContentEdit { kind, .. } => Some(NavTarget::Content(*kind)),
            Route::ResourceList { resource } => Some(NavTarget::Resource(*resource)),
            Route::Login {} | Route::NotFound { .. } => None,
        }
    }
}

/// Auth guard layout.
///
/// While the session is still loading a neutral placeholder is shown and no
/// navigation happens; only a settled "signed out" redirects to login.
#[component]
fn AuthGuard() -> Element {
    let session = use_session();

    match session.shell_state() {
        ShellState::Loading => rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        },
        ShellState::Unauthenticated => {
            navigator().replace(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        ShellState::Authenticated(_) => rsx! { Outlet::<Route> {} },
    }
}

/// Main layout with the role-filtered sidebar and the top bar.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let mut session = use_session();
    let services = use_services();

    let Some(role) = session.role() else {
        return rsx! {};
    };
    let user = session.user();
    let display_name = user.as_ref().map(|u| u.display_name().to_string()).unwrap_or_default();
    let email = user.map(|u| u.email).unwrap_or_default();
    let initials: String = display_name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();

    let active = route.nav_target();
    let allowed = active.map(|t| can_access(role, t)).unwrap_or(true);
    let page_title = match &route {
        Route::Dashboard {} => "Dashboard".to_string(),
        Route::ContentList { kind } => kind.plural_label().to_string(),
        Route::ContentCreate { kind } => format!("New {}", kind.label()),
        Route::ContentEdit { kind, .. } => format!("Edit {}", kind.label()),
        Route::ResourceList { resource } => resource.label().to_string(),
        Route::Login {} | Route::NotFound { .. } => String::new(),
    };

    let mut menu_open = use_signal(|| false);

    rsx! {
        div { class: "shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    span { class: "sidebar-brand-name", "Content Admin" }
                }
                nav { class: "sidebar-nav",
                    for item in nav_items_for(role) {
                        Link {
                            key: "{item.label}",
                            to: Route::for_target(item.target),
                            class: nav_link_class(active == Some(item.target)),
                            NavIcon { target: item.target }
                            span { "{item.label}" }
                        }
                    }
                }
                div { class: "sidebar-footer",
                    span { class: "sidebar-footer-label", "{role.label()}" }
                }
            }
            div { class: "shell-main",
                header { class: "navbar-bar",
                    span { class: "navbar-title", "{page_title}" }
                    div { class: "navbar-spacer" }
                    div { class: "profile-menu",
                        button {
                            class: "profile-trigger",
                            r#type: "button",
                            onclick: move |_| menu_open.toggle(),
                            span { class: "profile-initials", "{initials}" }
                        }
                        if menu_open() {
                            div { class: "profile-menu-content",
                                div { class: "profile-menu-name", "{display_name}" }
                                div { class: "profile-menu-email", "{email}" }
                                button {
                                    class: "profile-menu-item",
                                    r#type: "button",
                                    onclick: move |_| {
                                        menu_open.set(false);
                                        let api = services.api.clone();
                                        spawn(async move {
                                            client::auth::sign_out(&api).await;
                                        });
                                        session.clear();
                                        tracing::info!("signed out");
                                        navigator().replace(Route::Login {});
                                    },
                                    Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                                    "Sign Out"
                                }
                            }
                        }
                    }
                }
                main { class: "page-content",
                    if allowed {
                        Outlet::<Route> {}
                    } else {
                        Forbidden { role }
                    }
                }
            }
        }
    }
}

#[component]
fn Forbidden(role: Role) -> Element {
    rsx! {
        div { class: "not-found-card",
            h1 { class: "not-found-title", "Not available" }
            p { class: "not-found-message",
                "This section is not available to the {role.label()} role."
            }
            Link { to: Route::Dashboard {}, class: "not-found-link", "Back to Dashboard" }
        }
    }
}

fn nav_link_class(active: bool) -> &'static str {
    if active {
        "sidebar-link active"
    } else {
        "sidebar-link"
    }
}

#[component]
fn NavIcon(target: NavTarget) -> Element {
    match target {
        NavTarget::Dashboard => rsx! {
            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
        },
        NavTarget::Content(ContentKind::Article) => rsx! {
            Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 }
        },
        NavTarget::Content(ContentKind::Question) => rsx! {
            Icon::<LdMessageCircle> { icon: LdMessageCircle, width: 18, height: 18 }
        },
        NavTarget::Content(ContentKind::Event) => rsx! {
            Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Book) => rsx! {
            Icon::<LdBook> { icon: LdBook, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Gallery) => rsx! {
            Icon::<LdImage> { icon: LdImage, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Feedback) => rsx! {
            Icon::<LdMessageSquare> { icon: LdMessageSquare, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Topic)
        | NavTarget::Resource(ResourceKind::Tag) => rsx! {
            Icon::<LdTag> { icon: LdTag, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Writer) => rsx! {
            Icon::<LdPenTool> { icon: LdPenTool, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Translator) => rsx! {
            Icon::<LdUserCheck> { icon: LdUserCheck, width: 18, height: 18 }
        },
        NavTarget::Resource(ResourceKind::Language) => rsx! {
            Icon::<LdLanguages> { icon: LdLanguages, width: 18, height: 18 }
        },
    }
}

// Route components. Content pages are keyed so switching kind or record
// remounts them with fresh state.
#[component]
fn ContentList(kind: ContentKind) -> Element {
    rsx! { ContentListPage { key: "{kind}", kind } }
}

#[component]
fn ContentCreate(kind: ContentKind) -> Element {
    rsx! { ContentFormPage { key: "{kind}-new", kind, id: None } }
}

#[component]
fn ContentEdit(kind: ContentKind, id: String) -> Element {
    rsx! { ContentFormPage { key: "{kind}-{id}", kind, id: Some(id.clone()) } }
}

#[component]
fn ResourceList(resource: ResourceKind) -> Element {
    rsx! { ResourceListPage { key: "{resource}", resource } }
}
