use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, LoginRequest, Role};

use crate::common::{self, MockServer};

fn request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn test_sign_in_returns_staff_user() {
    let server = MockServer::start(common::seeded_backend()).await;

    let user = client::auth::sign_in(&server.api(), &request("sana@example.org", "secret"))
        .await
        .unwrap();

    assert_eq!(user.email, "sana@example.org");
    assert_eq!(user.role(), Some(Role::Editor));
    assert_eq!(user.display_name(), "Sana");
}

#[tokio::test]
async fn test_wrong_password_surfaces_server_message() {
    let server = MockServer::start(common::seeded_backend()).await;

    let err = client::auth::sign_in(&server.api(), &request("sana@example.org", "guess"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.friendly_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_unknown_role_is_refused() {
    let mut backend = common::seeded_backend();
    backend.login_role = Some("subscriber".into());
    let server = MockServer::start(backend).await;

    let err = client::auth::sign_in(&server.api(), &request("reader@example.org", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_malformed_email_is_rejected_locally() {
    let api = common::unreachable_api().await;

    let err = client::auth::sign_in(&api, &request("not-an-email", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("email"));
}

#[tokio::test]
async fn test_restore_session_reads_current_user() {
    let mut backend = common::seeded_backend();
    backend.session = Some(json!({
        "uid": "u9",
        "email": "mod@example.org",
        "role": "moderator"
    }));
    let server = MockServer::start(backend).await;

    let user = client::auth::restore_session(&server.api()).await.unwrap();

    assert_eq!(user.uid, "u9");
    assert_eq!(user.role(), Some(Role::Moderator));
    assert_eq!(user.display_name(), "mod@example.org");
}

#[tokio::test]
async fn test_restore_without_session_is_none() {
    let server = MockServer::start(common::seeded_backend()).await;
    assert_eq!(client::auth::restore_session(&server.api()).await, None);

    let api = common::unreachable_api().await;
    assert_eq!(client::auth::restore_session(&api).await, None);
}

#[tokio::test]
async fn test_sign_out_tolerates_backend_failure() {
    let server = MockServer::start(common::seeded_backend()).await;
    client::auth::sign_out(&server.api()).await;
}
