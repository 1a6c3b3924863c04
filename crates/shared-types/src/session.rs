use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::content::ContentKind;
use crate::resource::ResourceKind;

/// Staff role controlling which navigation entries are shown.
///
/// - `Admin`: everything, including reference lists.
/// - `Editor`: content and library screens.
/// - `Moderator`: questions and feedback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Moderator,
}

impl Role {
    /// Parse the backend `role` value. Unknown roles get no access.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "moderator" => Some(Role::Moderator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Moderator => "moderator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Editor => "Editor",
            Role::Moderator => "Moderator",
        }
    }
}

/// Signed-in staff member as returned by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub fname: String,
}

impl SessionUser {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Name for the profile menu; falls back to the email.
    pub fn display_name(&self) -> &str {
        if self.fname.trim().is_empty() {
            &self.email
        } else {
            &self.fname
        }
    }
}

/// Read-only view of the session provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(SessionUser::role)
    }

    pub fn shell_state(&self) -> ShellState {
        if self.loading {
            return ShellState::Loading;
        }
        match self.role() {
            Some(role) => ShellState::Authenticated(role),
            None => ShellState::Unauthenticated,
        }
    }
}

/// What the authenticated shell renders.
///
/// `Loading` shows a placeholder and never redirects. A user whose role is
/// not recognized counts as unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Loading,
    Unauthenticated,
    Authenticated(Role),
}

/// Where a navigation entry leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Dashboard,
    Content(ContentKind),
    Resource(ResourceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub target: NavTarget,
    pub roles: &'static [Role],
}

impl NavItem {
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Editor, Role::Moderator];
const CONTENT_ROLES: &[Role] = &[Role::Admin, Role::Editor];
const QUESTION_ROLES: &[Role] = &[Role::Admin, Role::Editor, Role::Moderator];
const FEEDBACK_ROLES: &[Role] = &[Role::Admin, Role::Moderator];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

const fn nav(label: &'static str, target: NavTarget, roles: &'static [Role]) -> NavItem {
    NavItem {
        label,
        target,
        roles,
    }
}

pub const NAV_ITEMS: &[NavItem] = &[
    nav("Dashboard", NavTarget::Dashboard, ALL_ROLES),
    nav("Articles", NavTarget::Content(ContentKind::Article), CONTENT_ROLES),
    nav("Questions", NavTarget::Content(ContentKind::Question), QUESTION_ROLES),
    nav("Events", NavTarget::Content(ContentKind::Event), CONTENT_ROLES),
    nav("Books", NavTarget::Resource(ResourceKind::Book), CONTENT_ROLES),
    nav("Galleries", NavTarget::Resource(ResourceKind::Gallery), CONTENT_ROLES),
    nav("Topics", NavTarget::Resource(ResourceKind::Topic), ADMIN_ONLY),
    nav("Tags", NavTarget::Resource(ResourceKind::Tag), ADMIN_ONLY),
    nav("Writers", NavTarget::Resource(ResourceKind::Writer), ADMIN_ONLY),
    nav("Translators", NavTarget::Resource(ResourceKind::Translator), ADMIN_ONLY),
    nav("Languages", NavTarget::Resource(ResourceKind::Language), ADMIN_ONLY),
    nav("Feedback", NavTarget::Resource(ResourceKind::Feedback), FEEDBACK_ROLES),
];

/// Navigation entries visible to `role`, in table order.
pub fn nav_items_for(role: Role) -> Vec<&'static NavItem> {
    NAV_ITEMS.iter().filter(|item| item.allows(role)).collect()
}

/// Whether `role` may open the screen behind `target`.
pub fn can_access(role: Role, target: NavTarget) -> bool {
    NAV_ITEMS
        .iter()
        .any(|item| item.target == target && item.allows(role))
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
