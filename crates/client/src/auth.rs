use serde_json::Value;
use shared_types::{AppError, LoginRequest, SessionUser};
use validator::Validate;

use crate::http::ApiClient;

/// `POST /auth/login`. The email is checked locally before anything is sent.
#[tracing::instrument(skip(api, request), fields(email = %request.email))]
pub async fn sign_in(api: &ApiClient, request: &LoginRequest) -> Result<SessionUser, AppError> {
    request.validate()?;
    let body = api.post_json("auth/login", request).await?;
    let user: SessionUser = serde_json::from_value(unwrap_user(&body))
        .map_err(|e| AppError::internal(format!("Unexpected sign-in response: {e}")))?;
    if user.role().is_none() {
        tracing::warn!(role = %user.role, "sign-in returned an unknown role");
        return Err(AppError::unauthorized("This account has no access to the admin panel."));
    }
    tracing::info!(uid = %user.uid, role = %user.role, "signed in");
    Ok(user)
}

/// `GET /auth/me`: the user of an existing backend session, if any. Every
/// failure, including an unknown role, resolves to `None`.
#[tracing::instrument(skip(api))]
pub async fn restore_session(api: &ApiClient) -> Option<SessionUser> {
    let body = match api.get_json("auth/me").await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, "no session to restore");
            return None;
        }
    };
    let user: SessionUser = serde_json::from_value(unwrap_user(&body)).ok()?;
    user.role().map(|_| user)
}

/// `POST /auth/logout`. Failures are logged and otherwise ignored; the local
/// session is cleared regardless.
#[tracing::instrument(skip(api))]
pub async fn sign_out(api: &ApiClient) {
    if let Err(e) = api.post_json("auth/logout", &Value::Object(Default::default())).await {
        tracing::warn!(error = %e, "logout request failed");
    }
}

/// Login and session responses may wrap the user in `user` or `data`.
fn unwrap_user(body: &Value) -> Value {
    ["user", "data"]
        .iter()
        .find_map(|key| body.get(*key).filter(|v| v.is_object()))
        .unwrap_or(body)
        .clone()
}
