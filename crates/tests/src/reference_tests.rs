use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, ReferenceKind};

use crate::common::{self, MockServer};

#[tokio::test]
async fn test_reference_lists_load_from_every_envelope() {
    let server = MockServer::start(common::seeded_backend()).await;

    let load = client::reference::load_reference_data(&server.api()).await;

    assert!(load.is_complete());
    assert_eq!(load.failure_summary(), None);
    let topics: Vec<&str> = load.data.topics.iter().map(|t| t.display_value.as_str()).collect();
    assert_eq!(topics, vec!["Fiqh", "Seerah"]);
    assert_eq!(load.data.writers.len(), 2);
    assert_eq!(load.data.writers[0].designation.as_deref(), Some("Mufti"));
    assert_eq!(load.data.tags[0].id, "g1");
}

#[tokio::test]
async fn test_failed_list_leaves_the_others_usable() {
    let mut backend = common::seeded_backend();
    backend.failing.push("writers".into());
    backend.failing.push("tags".into());
    let server = MockServer::start(backend).await;

    let load = client::reference::load_reference_data(&server.api()).await;

    assert!(!load.is_complete());
    assert!(load.data.writers.is_empty());
    assert!(load.data.tags.is_empty());
    assert_eq!(load.data.topics.len(), 2);
    assert_eq!(load.data.languages.len(), 1);

    let failed: Vec<ReferenceKind> = load.failures.iter().map(|(k, _)| *k).collect();
    assert_eq!(failed, vec![ReferenceKind::Writer, ReferenceKind::Tag]);
    assert!(load
        .failures
        .iter()
        .all(|(_, e)| e.kind == AppErrorKind::ServerRejection && e.status == Some(500)));
    assert_eq!(load.failure_summary().as_deref(), Some("Could not load: Writers, Tags"));
}

#[tokio::test]
async fn test_unreachable_backend_fails_every_list() {
    let api = common::unreachable_api().await;

    let load = client::reference::load_reference_data(&api).await;

    assert_eq!(load.failures.len(), ReferenceKind::ALL.len());
    assert!(load.failures.iter().all(|(_, e)| e.kind == AppErrorKind::NetworkError));
}
