use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde_json::Value;
use shared_types::{
    record_id, AppError, ContentForm, FormFields, FormMode, ImagePayload, ResolvedMedia,
    UpdateMethod,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::http::{json_body, ApiClient};
use crate::media::{resolve_media, PresetStore};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// What a successful submission returns.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// Id of the created or updated record, when known.
    pub id: Option<String>,
    /// Confirmation text, from the server when it sent one.
    pub message: String,
    pub response: Value,
}

/// Sends one content form to the backend.
///
/// Only one submission runs at a time; a second call while one is in flight
/// fails with `Conflict` and sends nothing. Progress goes from 0 to 99 while
/// the body streams out and reaches 100 only once the server has answered
/// with success.
pub struct SubmissionPipeline<S> {
    api: ApiClient,
    store: S,
    in_flight: AtomicBool,
    progress: Arc<watch::Sender<u8>>,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: PresetStore> SubmissionPipeline<S> {
    pub fn new(api: ApiClient, store: S) -> Self {
        let (tx, _rx) = watch::channel(0u8);
        Self {
            api,
            store,
            in_flight: AtomicBool::new(false),
            progress: Arc::new(tx),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Watch upload progress as a percentage.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[tracing::instrument(skip(self, form), fields(entity = %form.kind(), id = ?form.edit_id()))]
    pub async fn submit(
        &self,
        form: &ContentForm,
        publish: bool,
    ) -> Result<SubmitOutcome, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("submission already in progress");
            return Err(AppError::conflict("A submission is already in progress."));
        }
        let _guard = InFlightGuard(&self.in_flight);
        self.progress.send_replace(0);

        let fields = form.to_fields(publish)?;
        let media = resolve_media(&form.media, &self.store).await?;
        let multipart = build_multipart(fields, media, Arc::clone(&self.progress))?;

        let kind = form.kind();
        let request = match form.mode() {
            FormMode::Create => self.api.http().post(self.api.url(kind.endpoint())),
            FormMode::Edit { id } => {
                let url = self.api.url(&format!("{}/{}", kind.endpoint(), id));
                match kind.update_method() {
                    UpdateMethod::Put => self.api.http().put(url),
                    UpdateMethod::Patch => self.api.http().patch(url),
                }
            }
        };

        let response = self.api.send(request.multipart(multipart)).await?;
        let body = json_body(response).await?;
        self.progress.send_replace(100);

        let outcome = outcome_from(form, body);
        tracing::info!(id = ?outcome.id, publish, "submission accepted");
        Ok(outcome)
    }
}

fn build_multipart(
    fields: FormFields,
    media: ResolvedMedia,
    progress: Arc<watch::Sender<u8>>,
) -> Result<Form, AppError> {
    let mut multipart = Form::new();
    for (name, value) in fields {
        multipart = multipart.text(name, value);
    }
    if let ResolvedMedia::Attach(image) = media {
        multipart = multipart.part(IMAGE_FIELD, image_part(image, progress)?);
    }
    Ok(multipart)
}

/// Stream the image in chunks so progress can follow the bytes on the wire.
fn image_part(image: ImagePayload, progress: Arc<watch::Sender<u8>>) -> Result<Part, AppError> {
    let total = image.bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = image
        .bytes
        .chunks(UPLOAD_CHUNK_BYTES)
        .map(<[u8]>::to_vec)
        .collect();
    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        progress.send_replace(upload_percent(sent, total));
        Ok::<_, std::io::Error>(chunk)
    });

    Part::stream_with_length(Body::wrap_stream(stream), total)
        .file_name(image.file_name)
        .mime_str(&image.content_type)
        .map_err(|e| AppError::internal(format!("Invalid image content type: {e}")))
}

/// Bytes sent as a percentage, held below 100 until the server confirms.
pub fn upload_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = sent.saturating_mul(100) / total;
    pct.min(99) as u8
}

fn outcome_from(form: &ContentForm, body: Value) -> SubmitOutcome {
    let id = body
        .get("data")
        .and_then(record_id)
        .or_else(|| body.get(form.kind().label().to_lowercase()).and_then(record_id))
        .or_else(|| record_id(&body))
        .or_else(|| form.edit_id().map(str::to_string));
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let verb = match form.mode() {
                FormMode::Create => "created",
                FormMode::Edit { .. } => "updated",
            };
            format!("{} {verb} successfully", form.kind().label())
        });
    SubmitOutcome { id, message, response: body }
}
