use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use shared_types::{ApiConfig, AppError};
use std::time::Duration;

use crate::error_convert::{response_to_app_error, ReqwestErrorExt};

/// Thin wrapper over a shared `reqwest::Client` rooted at the API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the globally loaded configuration.
    pub fn from_config() -> Result<Self, AppError> {
        Self::new(&crate::config::load().api)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send a request and fail on any non-success status.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await.map_err(ReqwestErrorExt::into_app_error)?;
        if !response.status().is_success() {
            return Err(response_to_app_error(response).await);
        }
        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_json(&self, path: &str) -> Result<Value, AppError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        json_body(response).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, AppError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        json_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.http.delete(self.url(path))).await?;
        tracing::info!(path, "record deleted");
        Ok(())
    }
}

/// Body of a successful response. Empty bodies become `Null`, non-JSON
/// text becomes a string value.
pub(crate) async fn json_body(response: Response) -> Result<Value, AppError> {
    let text = response.text().await.map_err(ReqwestErrorExt::into_app_error)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
