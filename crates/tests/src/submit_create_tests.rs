use axum::http::{Method, StatusCode};
use client::ApiClient;
use client::media::HttpPresetStore;
use client::submit::SubmissionPipeline;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    ApiConfig, AppErrorKind, ContentForm, ContentKind, ContentLanguage, LocalFile, ReferenceData,
};
use std::time::{Duration, Instant};

use crate::common::{self, MockServer};

async fn start() -> (MockServer, ReferenceData) {
    let mut backend = common::seeded_backend();
    backend.presets.insert("calligraphy.jpg".into(), vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]);
    let server = MockServer::start(backend).await;
    let refs = common::seeded_refs(&server.api()).await;
    (server, refs)
}

fn pipeline(server: &MockServer) -> SubmissionPipeline<HttpPresetStore> {
    let api = server.api();
    let presets = HttpPresetStore::new(&api, server.root_url.clone());
    SubmissionPipeline::new(api, presets)
}

fn article(refs: &ReferenceData) -> ContentForm {
    let mut form = ContentForm::create(ContentKind::Article);
    form.set_primary("Fasting Rules");
    form.set_topic("t1");
    form.set_language("l1");
    form.set_date("10/03/2024");
    form.select_writer("w1", refs);
    form.set_block_title(ContentLanguage::English, "Fasting Rules");
    form.set_block_body(ContentLanguage::English, "<p>Fast from dawn to sunset.</p>");
    form
}

fn png(size: usize) -> LocalFile {
    LocalFile {
        name: "cover.png".into(),
        content_type: "image/png".into(),
        bytes: vec![7; size],
    }
}

#[tokio::test]
async fn test_create_article_attaches_default_preset() {
    let (server, refs) = start().await;

    let outcome = pipeline(&server).submit(&article(&refs), true).await.unwrap();

    assert_eq!(outcome.id.as_deref(), Some("articles-new"));
    assert_eq!(outcome.message, "Created");

    let captured = server.captured();
    assert_eq!(captured.len(), 1);
    let request = &captured[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/articles");
    assert_eq!(request.fields["title"], "Fasting Rules");
    assert_eq!(request.fields["topic"], "t1");
    assert_eq!(request.fields["language"], "l1");
    assert_eq!(request.fields["date"], "2024-03-10");
    assert_eq!(request.fields["writer"], "w1");
    assert_eq!(request.fields["writerDesignation"], "Mufti");
    assert_eq!(request.fields["englishTitle"], "Fasting Rules");
    assert_eq!(request.fields["englishDescription"], "<p>Fast from dawn to sunset.</p>");
    assert_eq!(request.fields["urduTitle"], "");
    assert_eq!(request.fields["isPublished"], "true");
    assert!(!request.fields.contains_key("customWriter"));

    assert_eq!(request.files.len(), 1);
    let image = &request.files[0];
    assert_eq!(image.field, "image");
    assert_eq!(image.file_name, "calligraphy.jpg");
    assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(image.size, 7);
}

#[tokio::test]
async fn test_create_with_upload_sends_the_file_as_draft() {
    let (server, refs) = start().await;
    let mut form = article(&refs);
    form.media.select_upload(png(200 * 1024)).unwrap();

    pipeline(&server).submit(&form, false).await.unwrap();

    let request = &server.captured()[0];
    assert_eq!(request.fields["isPublished"], "false");
    assert_eq!(request.files.len(), 1);
    assert_eq!(request.files[0].file_name, "cover.png");
    assert_eq!(request.files[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(request.files[0].size, 200 * 1024);
}

#[tokio::test]
async fn test_custom_writer_sent_under_both_fields() {
    let (server, refs) = start().await;
    let mut form = article(&refs);
    form.set_custom_writer_mode(true);
    form.set_custom_writer_name("Guest Scholar");

    pipeline(&server).submit(&form, false).await.unwrap();

    let request = &server.captured()[0];
    assert_eq!(request.fields["writer"], "Guest Scholar");
    assert_eq!(request.fields["customWriter"], "Guest Scholar");
    assert!(!request.fields.contains_key("writerDesignation"));
}

#[tokio::test]
async fn test_progress_reaches_100_after_success() {
    let (server, refs) = start().await;
    let mut form = article(&refs);
    form.media.select_upload(png(300 * 1024)).unwrap();
    let pipeline = pipeline(&server);
    let progress = pipeline.progress();

    pipeline.submit(&form, true).await.unwrap();

    assert_eq!(*progress.borrow(), 100);
    assert!(!pipeline.is_in_flight());
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_conflict() {
    let (server, refs) = start().await;
    server.with_backend(|b| b.write_delay = Some(Duration::from_millis(200)));
    let form = article(&refs);
    let pipeline = pipeline(&server);

    let (first, second) = tokio::join!(pipeline.submit(&form, true), pipeline.submit(&form, true));

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err().kind, AppErrorKind::Conflict);
    assert_eq!(server.captured().len(), 1);

    pipeline.submit(&form, true).await.unwrap();
    assert_eq!(server.captured().len(), 2);
}

#[tokio::test]
async fn test_server_rejection_carries_server_message() {
    let (server, refs) = start().await;
    server.with_backend(|b| {
        b.reject = Some((
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"error": {"message": "Title already exists"}}),
        ))
    });
    let pipeline = pipeline(&server);
    let progress = pipeline.progress();

    let err = pipeline.submit(&article(&refs), true).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ServerRejection);
    assert_eq!(err.status, Some(422));
    assert_eq!(err.friendly_message(), "Title already exists");
    assert!(*progress.borrow() < 100);
    assert!(!pipeline.is_in_flight());
}

#[tokio::test]
async fn test_missing_preset_blocks_submission() {
    let (server, refs) = start().await;
    let mut form = article(&refs);
    form.media.select_preset("lantern").unwrap();

    let err = pipeline(&server).submit(&form, true).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::MediaFetchError);
    assert!(err.message.contains("Lantern"));
    assert!(server.captured().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let (server, refs) = start().await;
    let mut form = article(&refs);
    form.media.select_upload(png(16)).unwrap();
    let api = common::unreachable_api().await;
    let presets = HttpPresetStore::new(&server.api(), server.root_url.clone());
    let pipeline = SubmissionPipeline::new(api, presets);

    let err = pipeline.submit(&form, true).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NetworkError);
    assert!(!pipeline.is_in_flight());
}

#[tokio::test]
async fn test_stalled_preset_host_times_out() {
    let (server, refs) = start().await;
    server.with_backend(|b| b.preset_delay = Some(Duration::from_secs(4)));
    let api = ApiClient::new(&ApiConfig {
        base_url: format!("{}/api", server.root_url),
        timeout_secs: 1,
    })
    .unwrap();
    let presets = HttpPresetStore::new(&api, server.root_url.clone());
    let pipeline = SubmissionPipeline::new(api, presets);

    let started = Instant::now();
    let err = pipeline.submit(&article(&refs), true).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::MediaFetchError);
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(server.captured().is_empty());
    assert!(!pipeline.is_in_flight());
}
