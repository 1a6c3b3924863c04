use shared_types::{AppError, NETWORK_FAILURE_MESSAGE};

/// Convert a reqwest::Error into an AppError.
///
/// Everything reqwest reports before a usable response exists is a
/// network failure. Decode failures on a successful response are not.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::internal(format!("Unexpected response from server: {err}"));
    }
    if let Some(status) = err.status() {
        return AppError::from_response(status.as_u16(), "");
    }
    tracing::warn!(error = %err, "request failed before a response arrived");
    let mut app = AppError::network(err.to_string());
    if app.message.trim().is_empty() {
        app.message = NETWORK_FAILURE_MESSAGE.to_string();
    }
    app
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Turn a non-success response into an error, surfacing the server message.
pub async fn response_to_app_error(response: reqwest::Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status, "server rejected request");
    AppError::from_response(status, &body)
}
