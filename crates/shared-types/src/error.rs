use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fallback text for failures that carry no usable server message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Fallback text for requests that never reached the server.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Could not reach the server. Check your connection and try again.";

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    /// A required field is missing or malformed. Never sent to the network.
    ValidationError,
    /// A preset image could not be retrieved.
    MediaFetchError,
    /// The request failed before a response arrived.
    NetworkError,
    /// The server answered with a non-success status.
    ServerRejection,
    NotFound,
    Unauthorized,
    Conflict,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::MediaFetchError => write!(f, "MediaFetchError"),
            AppErrorKind::NetworkError => write!(f, "NetworkError"),
            AppErrorKind::ServerRejection => write!(f, "ServerRejection"),
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error shared by the client and the UI.
///
/// `field_errors` is keyed by wire field name so a form can flag every
/// offending input at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
    /// HTTP status for `ServerRejection`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: BTreeMap::new(),
            status: None,
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: BTreeMap<String, String>) -> Self {
        Self {
            field_errors,
            ..Self::new(AppErrorKind::ValidationError, message)
        }
    }

    /// Validation failure on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = BTreeMap::new();
        field_errors.insert(field.to_string(), message.clone());
        Self::validation(message, field_errors)
    }

    /// Build a single validation error that lists every missing field.
    pub fn missing_fields(fields: &[(&str, &str)]) -> Self {
        let labels: Vec<&str> = fields.iter().map(|(_, label)| *label).collect();
        let field_errors = fields
            .iter()
            .map(|(name, label)| (name.to_string(), format!("{label} is required")))
            .collect();
        Self::validation(
            format!("Please fill in: {}", labels.join(", ")),
            field_errors,
        )
    }

    pub fn media_fetch(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::MediaFetchError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NetworkError, message)
    }

    pub fn server_rejection(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(AppErrorKind::ServerRejection, message)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message)
    }

    /// Turn a non-success HTTP response into an error, surfacing the
    /// server-provided message when the body carries one.
    ///
    /// Recognized bodies: `{"message": "..."}`, `{"error": "..."}`,
    /// `{"error": {"message": "..."}}` and short plain text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_server_message(body);
        match status {
            401 | 403 => Self {
                status: Some(status),
                ..Self::unauthorized(
                    message.unwrap_or_else(|| "You are not allowed to do that.".to_string()),
                )
            },
            404 => Self {
                status: Some(status),
                ..Self::not_found(
                    message.unwrap_or_else(|| "The requested record was not found.".to_string()),
                )
            },
            _ => Self::server_rejection(
                status,
                message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ),
        }
    }

    /// Text for the error dialog shown at the submission boundary.
    pub fn friendly_message(&self) -> String {
        match self.kind {
            AppErrorKind::NetworkError => NETWORK_FAILURE_MESSAGE.to_string(),
            _ if self.message.trim().is_empty() => GENERIC_FAILURE_MESSAGE.to_string(),
            _ => self.message.clone(),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == AppErrorKind::ValidationError
    }
}

fn extract_server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let candidate = value
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| value.get("error").and_then(|e| e.as_str()))
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
            });
        return candidate
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
    }
    // HTML error pages are not worth showing.
    if trimmed.starts_with('<') || trimmed.len() > 300 {
        return None;
    }
    Some(trimmed.to_string())
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}
