use axum::http::Method;
use client::media::HttpPresetStore;
use client::submit::SubmissionPipeline;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    AnsweredStatus, AppErrorKind, ContentForm, ContentKind, LocalFile, MediaSource, WriterChoice,
};

use crate::common::{self, MockServer};

fn pipeline(server: &MockServer) -> SubmissionPipeline<HttpPresetStore> {
    let api = server.api();
    let presets = HttpPresetStore::new(&api, server.root_url.clone());
    SubmissionPipeline::new(api, presets)
}

/// Fetch the record and its image the way the edit screen hydrates.
async fn hydrate(server: &MockServer, kind: ContentKind, id: &str) -> ContentForm {
    let api = server.api();
    let refs = common::seeded_refs(&api).await;
    let record = client::content::fetch_record(&api, kind, id).await.unwrap();
    let mut form = ContentForm::edit(kind, id, &record, &refs);
    let existing = client::content::probe_image(&api, kind, id).await;
    form.media.apply_probe(existing);
    form
}

#[tokio::test]
async fn test_question_edit_patches_without_image() {
    let mut backend = common::seeded_backend();
    backend.records.insert(
        "questions/q1".into(),
        json!({
            "_id": "q1",
            "slug": "what-is-zakat",
            "questionEnglish": "What is Zakat?",
            "answerEnglish": "<p>Obligatory charity.</p>",
            "topic": "t1",
            "language": "l1",
            "writer": "w1",
            "writerDesignation": "Mufti",
            "date": "2024-03-10T00:00:00.000Z",
            "answeredStatus": "unanswered",
            "isPublished": false
        }),
    );
    backend.images.insert("questions/q1".into(), vec![1, 2, 3]);
    let server = MockServer::start(backend).await;

    let mut form = hydrate(&server, ContentKind::Question, "q1").await;
    assert_eq!(form.media.source(), &MediaSource::Unchanged);
    assert_eq!(form.item.metadata.writer, WriterChoice::Known("w1".into()));
    form.set_answered_status(AnsweredStatus::Answered);

    let outcome = pipeline(&server).submit(&form, true).await.unwrap();
    assert_eq!(outcome.id.as_deref(), Some("q1"));

    let request = &server.captured()[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, "/api/questions/q1");
    assert_eq!(request.fields["slug"], "what-is-zakat");
    assert_eq!(request.fields["questionEnglish"], "What is Zakat?");
    assert_eq!(request.fields["answerEnglish"], "<p>Obligatory charity.</p>");
    assert_eq!(request.fields["date"], "2024-03-10");
    assert_eq!(request.fields["answeredStatus"], "answered");
    assert_eq!(request.fields["isPublished"], "true");
    assert!(request.files.is_empty());
}

#[tokio::test]
async fn test_article_edit_puts_replacement_upload() {
    let mut backend = common::seeded_backend();
    backend.records.insert(
        "articles/a1".into(),
        json!({
            "_id": "a1",
            "title": "Fasting Rules",
            "topic": "t1",
            "language": "l1",
            "writer": "Guest Scholar",
            "date": "2024-03-10",
            "isPublished": true
        }),
    );
    backend.images.insert("articles/a1".into(), vec![1, 2, 3]);
    let server = MockServer::start(backend).await;

    let mut form = hydrate(&server, ContentKind::Article, "a1").await;
    assert_eq!(form.item.metadata.writer, WriterChoice::Custom("Guest Scholar".into()));
    form.media
        .select_upload(LocalFile {
            name: "new-cover.webp".into(),
            content_type: "image/webp".into(),
            bytes: vec![5; 64],
        })
        .unwrap();

    pipeline(&server).submit(&form, false).await.unwrap();

    let request = &server.captured()[0];
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/api/articles/a1");
    assert_eq!(request.fields["isPublished"], "false");
    assert_eq!(request.fields["customWriter"], "Guest Scholar");
    assert_eq!(request.files.len(), 1);
    assert_eq!(request.files[0].file_name, "new-cover.webp");
}

#[tokio::test]
async fn test_edit_without_stored_image_falls_back_to_preset() {
    let mut backend = common::seeded_backend();
    backend.records.insert(
        "events/e1".into(),
        json!({
            "_id": "e1",
            "title": "Eid Gathering",
            "topic": "t2",
            "language": "l1",
            "writer": "w2",
            "date": "2024-04-10",
            "venue": "Main Hall"
        }),
    );
    backend.presets.insert("calligraphy.jpg".into(), vec![9; 12]);
    let server = MockServer::start(backend).await;

    let form = hydrate(&server, ContentKind::Event, "e1").await;
    assert_eq!(form.media.source(), &MediaSource::Preset("calligraphy".into()));

    pipeline(&server).submit(&form, true).await.unwrap();

    let request = &server.captured()[0];
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.fields["venue"], "Main Hall");
    assert!(!request.fields.contains_key("time"));
    assert_eq!(request.files[0].file_name, "calligraphy.jpg");
}

#[tokio::test]
async fn test_invalid_event_sends_nothing() {
    let server = MockServer::start(common::seeded_backend()).await;
    let mut form = ContentForm::create(ContentKind::Event);
    form.set_primary("Eid Gathering");
    form.set_language("l1");
    form.set_date("2024-04-10");
    form.set_custom_writer_mode(true);
    form.set_custom_writer_name("Guest");

    let err = pipeline(&server).submit(&form, true).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    let fields: Vec<&str> = err.field_errors.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["topic", "venue"]);
    assert!(server.captured().is_empty());
}
