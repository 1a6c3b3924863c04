use serde_json::Value;
use shared_types::{list_records, AppError, ContentKind};

use crate::http::ApiClient;

/// `GET /{entity}/{id}`. Some backends wrap the record in `data` or in the
/// singular entity name.
#[tracing::instrument(skip(api))]
pub async fn fetch_record(api: &ApiClient, kind: ContentKind, id: &str) -> Result<Value, AppError> {
    let body = api.get_json(&format!("{}/{}", kind.endpoint(), id)).await?;
    let singular = kind.label().to_lowercase();
    let record = match body {
        Value::Object(ref map) if map.contains_key("data") => map["data"].clone(),
        Value::Object(ref map) if map.contains_key(&singular) => map[&singular].clone(),
        other => other,
    };
    if !record.is_object() {
        return Err(AppError::not_found(format!("{} {id} was not found", kind.label())));
    }
    Ok(record)
}

/// Probe `GET /{entity}/image/{id}` for the currently stored image.
///
/// Returns a displayable URL, or `None` when the record has no image. Any
/// failure counts as "no image".
#[tracing::instrument(skip(api))]
pub async fn probe_image(api: &ApiClient, kind: ContentKind, id: &str) -> Option<String> {
    let url = api.url(&format!("{}/image/{}", kind.endpoint(), id));
    let response = match api.http().get(&url).send().await {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            tracing::debug!(status = r.status().as_u16(), "no stored image");
            return None;
        }
        Err(e) => {
            tracing::debug!(error = %e, "image probe failed");
            return None;
        }
    };

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("image/") {
        return Some(url);
    }

    let body: Value = response.json().await.ok()?;
    ["url", "imageUrl", "image"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.trim().is_empty())
        .map(|s| absolutize(api, s))
}

/// Image URLs may come back relative to the API host.
fn absolutize(api: &ApiClient, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        url.to_string()
    } else {
        api.url(url)
    }
}

/// `GET /{endpoint}` as a list of records.
#[tracing::instrument(skip(api))]
pub async fn list(api: &ApiClient, endpoint: &str) -> Result<Vec<Value>, AppError> {
    let body = api.get_json(endpoint).await?;
    let records = list_records(endpoint, &body).to_vec();
    tracing::debug!(count = records.len(), "records listed");
    Ok(records)
}

/// `DELETE /{endpoint}/{id}`.
pub async fn delete(api: &ApiClient, endpoint: &str, id: &str) -> Result<(), AppError> {
    api.delete(&format!("{endpoint}/{id}")).await
}
