// Tests for the favorites toggle and 401 invalidation against a mocked
// HTTP server.

use mockito::{Matcher, Server, ServerGuard};

use carelink::api::FavoritesError;
use carelink::app::{App, NoticeKind};
use carelink::config::Config;
use carelink::storage::KvStore;

const LOGIN_SUCCESS_BODY: &str = r#"{
    "success": true,
    "data": {
        "access_token": "tok-live-1",
        "PatientProfile": {
            "id": "pp-1",
            "first_name": "Maya",
            "last_name": "Kurian",
            "profile_picture": ""
        },
        "User": {"id": "pu-1"}
    }
}"#;

fn app_against(base_url: &str) -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = KvStore::open(dir.path().join("storage.json")).expect("open");
    let config = Config {
        base_url: Some(base_url.to_string()),
        ..Default::default()
    };
    let app = App::from_parts(config, store).expect("app");
    (dir, app)
}

/// Sign the app in against a one-shot login mock.
async fn signed_in_app(server: &mut ServerGuard) -> (tempfile::TempDir, App) {
    server
        .mock("POST", "/login")
        .with_status(200)
        .with_body(LOGIN_SUCCESS_BODY)
        .create_async()
        .await;

    let (dir, mut app) = app_against(&server.url());
    app.attempt_login("maya@x.com", "pw-1", false)
        .await
        .expect("login");
    (dir, app)
}

#[tokio::test]
async fn toggle_adds_only_after_server_confirms() {
    let mut server = Server::new_async().await;
    let (_dir, mut app) = signed_in_app(&mut server).await;

    let add_mock = server
        .mock("POST", "/add-my-providers")
        .match_header("authorization", "Bearer tok-live-1")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "PatientMyProviders": {
                "doctor_user_id": "D1",
                "is_deleted": "no",
                "patient_user_id": "pu-1"
            }
        })))
        .with_status(200)
        .with_body(r#"{"success": true, "msg": "Added"}"#)
        .create_async()
        .await;

    app.toggle_favorite("D1").await;
    add_mock.assert_async().await;

    assert!(app.favorites.contains("D1"));
    let notice = app.take_notice().expect("notice emitted");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Added to favorites");
}

#[tokio::test]
async fn toggle_removes_with_soft_delete_flag() {
    let mut server = Server::new_async().await;
    let (_dir, mut app) = signed_in_app(&mut server).await;

    server
        .mock("POST", "/add-my-providers")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "PatientMyProviders": {"is_deleted": "no"}
        })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let remove_mock = server
        .mock("POST", "/add-my-providers")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "PatientMyProviders": {"doctor_user_id": "D1", "is_deleted": "yes"}
        })))
        .with_status(200)
        .with_body(r#"{"success": true, "msg": "Removed"}"#)
        .create_async()
        .await;

    app.toggle_favorite("D1").await;
    app.take_notice();
    app.toggle_favorite("D1").await;
    remove_mock.assert_async().await;

    assert!(!app.favorites.contains("D1"));
    let notice = app.take_notice().expect("notice emitted");
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.text, "Removed from favorites");
}

#[tokio::test]
async fn rejected_toggle_leaves_local_state_unchanged() {
    let mut server = Server::new_async().await;
    let (_dir, mut app) = signed_in_app(&mut server).await;

    server
        .mock("POST", "/add-my-providers")
        .with_status(200)
        .with_body(r#"{"success": false, "msg": "Provider limit reached"}"#)
        .create_async()
        .await;

    app.toggle_favorite("D1").await;

    assert!(!app.favorites.contains("D1"));
    let notice = app.take_notice().expect("notice emitted");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Provider limit reached");
}

#[tokio::test]
async fn missing_session_makes_no_network_call() {
    let mut server = Server::new_async().await;

    let favorites_mock = server
        .mock("POST", "/add-my-providers")
        .expect(0)
        .create_async()
        .await;

    let (_dir, mut app) = app_against(&server.url());

    app.toggle_favorite("D1").await;

    favorites_mock.assert_async().await;
    assert!(app.favorites.is_empty());
    let notice = app.take_notice().expect("notice emitted");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, FavoritesError::MissingSession.to_string());
}

#[tokio::test]
async fn unauthorized_doctor_list_invalidates_stored_session() {
    let mut server = Server::new_async().await;
    let (_dir, mut app) = signed_in_app(&mut server).await;
    assert_eq!(app.sessions.store().get("authToken"), Some("tok-live-1"));

    server
        .mock("POST", "/doc-list")
        .with_status(401)
        .with_body(r#"{"success": false, "msg": "Token expired"}"#)
        .create_async()
        .await;

    app.load_doctors().await;

    let notice = app.take_notice().expect("notice emitted");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Session expired. Please log in again.");

    // The dead token is gone from memory and storage; the next toggle
    // fails fast without a request.
    assert!(!app.sessions.is_authenticated());
    assert_eq!(app.sessions.store().get("authToken"), None);

    let favorites_mock = server
        .mock("POST", "/add-my-providers")
        .expect(0)
        .create_async()
        .await;
    app.toggle_favorite("D1").await;
    favorites_mock.assert_async().await;
}

#[tokio::test]
async fn doctor_list_parses_directory() {
    let mut server = Server::new_async().await;
    let (_dir, mut app) = signed_in_app(&mut server).await;

    server
        .mock("POST", "/doc-list")
        .match_header("authorization", "Bearer tok-live-1")
        .with_status(200)
        .with_body(
            r#"{
                "success": true,
                "data": [
                    {"id": "D1", "name": "Dr. Sarah Mathew", "specialty": [{"name": "Cardiology"}]},
                    {"id": "D2", "name": "Dr. Arjun Nair", "specialty": []}
                ]
            }"#,
        )
        .create_async()
        .await;

    app.load_doctors().await;

    assert_eq!(app.doctors.len(), 2);
    assert_eq!(app.doctors[0].primary_specialty(), "Cardiology");
    assert_eq!(app.doctors[1].primary_specialty(), "N/A");
    // No availability dataset outside demo mode.
    assert!(app.slots_for("D1").is_none());
}
