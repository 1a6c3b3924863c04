use axum::http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, ContentKind, ListRow, ResourceKind};

use crate::common::{self, MockServer};

#[tokio::test]
async fn test_fetch_record_unwraps_data_envelope() {
    let mut backend = common::seeded_backend();
    backend.records.insert(
        "articles/a1".into(),
        json!({"_id": "a1", "title": "Fasting Rules", "topic": "t1"}),
    );
    let server = MockServer::start(backend).await;

    let record = client::content::fetch_record(&server.api(), ContentKind::Article, "a1")
        .await
        .unwrap();

    assert_eq!(record["title"], "Fasting Rules");
}

#[tokio::test]
async fn test_fetch_missing_record_is_not_found() {
    let server = MockServer::start(common::seeded_backend()).await;

    let err = client::content::fetch_record(&server.api(), ContentKind::Event, "nope")
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_fetch_record_without_backend_is_network_error() {
    let api = common::unreachable_api().await;

    let err = client::content::fetch_record(&api, ContentKind::Question, "q1")
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NetworkError);
    assert!(err.friendly_message().contains("Could not reach the server"));
}

#[tokio::test]
async fn test_probe_reports_stored_image() {
    let mut backend = common::seeded_backend();
    backend.images.insert("articles/a1".into(), vec![137, 80, 78, 71]);
    let server = MockServer::start(backend).await;

    let url = client::content::probe_image(&server.api(), ContentKind::Article, "a1").await;

    assert_eq!(url, Some(format!("{}/api/articles/image/a1", server.root_url)));
}

#[tokio::test]
async fn test_probe_without_image_is_none() {
    let server = MockServer::start(common::seeded_backend()).await;

    let url = client::content::probe_image(&server.api(), ContentKind::Event, "e1").await;

    assert_eq!(url, None);
}

#[tokio::test]
async fn test_list_builds_rows_for_resource_columns() {
    let mut backend = common::seeded_backend();
    backend.collections.insert(
        "books".into(),
        json!({"books": [
            {"_id": "b1", "title": "Sahih Muslim", "author": "Imam Muslim"},
            {"_id": "b2", "title": "Riyad as-Salihin", "author": "Imam Nawawi"}
        ]}),
    );
    let server = MockServer::start(backend).await;

    let records = client::content::list(&server.api(), ResourceKind::Book.endpoint())
        .await
        .unwrap();
    let rows: Vec<ListRow> = records
        .iter()
        .filter_map(|r| ListRow::from_resource(ResourceKind::Book, r))
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].id, "b2");
    assert!(rows[0].cells.iter().any(|c| c == "Sahih Muslim"));
}

#[tokio::test]
async fn test_delete_targets_the_record() {
    let server = MockServer::start(common::seeded_backend()).await;

    client::content::delete(&server.api(), "questions", "q7").await.unwrap();

    let captured = server.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].method, Method::DELETE);
    assert_eq!(captured[0].path, "/api/questions/q7");
}
