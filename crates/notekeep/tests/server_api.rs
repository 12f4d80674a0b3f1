//! Wire contract tests: the axum router driven directly, backed by the
//! in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use notekeep::server::router;
use notekeepapp::service::NoteService;
use notekeepapp::store::memory::MemoryStore;

fn app() -> Router {
    router(Arc::new(NoteService::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn create_note(app: &Router, body: Value) -> Value {
    let (status, note) = send(app, Method::POST, "/api/notes", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    note
}

#[tokio::test]
async fn root_reports_the_api_is_up() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("notekeep API is running".into()));
}

#[tokio::test]
async fn create_returns_201_with_defaults() {
    let app = app();
    let note = create_note(&app, json!({ "title": "t", "content": "c" })).await;

    assert!(note["id"].is_string());
    assert_eq!(note["title"], "t");
    assert_eq!(note["content"], "c");
    assert_eq!(note["color"], "white");
    assert_eq!(note["isPinned"], false);
    assert_eq!(note["isArchived"], false);
    assert_eq!(note["isDeleted"], false);
    assert_eq!(note["createdAt"], note["updatedAt"]);

    let (status, notes) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notes.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_color_token_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({ "title": "t", "color": "mauve" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_merges_only_sent_fields() {
    let app = app();
    let note = create_note(&app, json!({ "title": "keep me", "content": "body" })).await;
    let id = note["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{}", id),
        Some(json!({ "color": "teal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["color"], "teal");
    assert_eq!(updated["title"], "keep me");
    assert_eq!(updated["content"], "body");
    assert_eq!(updated["isPinned"], false);
    assert_eq!(updated["createdAt"], note["createdAt"]);
    assert_ne!(updated["updatedAt"], note["updatedAt"]);
}

#[tokio::test]
async fn unknown_id_is_404_everywhere() {
    let app = app();
    let missing = "00000000-0000-4000-8000-000000000000";

    for (method, uri, body) in [
        (
            Method::PUT,
            format!("/api/notes/{}", missing),
            Some(json!({ "title": "x" })),
        ),
        (Method::PUT, format!("/api/notes/{}/restore", missing), None),
        (Method::PUT, format!("/api/notes/{}/archive", missing), None),
        (Method::DELETE, format!("/api/notes/{}", missing), None),
    ] {
        let (status, err) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {}", uri);
        assert!(err["error"].is_string());
    }
}

#[tokio::test]
async fn malformed_id_in_path_is_rejected() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/notes/not-a-uuid",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_moves_to_trash_and_restore_brings_back() {
    let app = app();
    let note = create_note(&app, json!({ "title": "cycle" })).await;
    let id = note["id"].as_str().unwrap();

    let (status, trashed) = send(&app, Method::DELETE, &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trashed["isDeleted"], true);

    let (_, active) = send(&app, Method::GET, "/api/notes", None).await;
    assert!(active.as_array().unwrap().is_empty());
    let (_, trash) = send(&app, Method::GET, "/api/notes/trash", None).await;
    assert_eq!(trash.as_array().unwrap().len(), 1);

    let (status, restored) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{}/restore", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["isDeleted"], false);

    let (_, active) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn archived_note_survives_the_trash_round_trip() {
    let app = app();
    let note = create_note(&app, json!({ "title": "filed" })).await;
    let id = note["id"].as_str().unwrap();

    let (status, archived) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{}/archive", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["isArchived"], true);

    send(&app, Method::DELETE, &format!("/api/notes/{}", id), None).await;
    send(
        &app,
        Method::PUT,
        &format!("/api/notes/{}/restore", id),
        None,
    )
    .await;

    // Back to the archive view, not the active board.
    let (_, active) = send(&app, Method::GET, "/api/notes", None).await;
    assert!(active.as_array().unwrap().is_empty());
    let (_, archive) = send(&app, Method::GET, "/api/notes/archive", None).await;
    assert_eq!(archive.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn permanent_delete_is_idempotent() {
    let app = app();
    let note = create_note(&app, json!({ "title": "purge me" })).await;
    let id = note["id"].as_str().unwrap();
    let uri = format!("/api/notes/{}?permanent=true", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Note permanently deleted");

    // Purging an id that is already gone is a no-op, not an error.
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    for uri in ["/api/notes", "/api/notes/archive", "/api/notes/trash"] {
        let (_, list) = send(&app, Method::GET, uri, None).await;
        assert!(list.as_array().unwrap().is_empty(), "uri: {}", uri);
    }
}

#[tokio::test]
async fn active_list_is_pinned_first_then_newest() {
    let app = app();
    let old = create_note(&app, json!({ "title": "old" })).await;
    create_note(&app, json!({ "title": "mid" })).await;
    create_note(&app, json!({ "title": "new" })).await;

    // Pin the oldest; it should jump the queue.
    let id = old["id"].as_str().unwrap();
    send(
        &app,
        Method::PUT,
        &format!("/api/notes/{}", id),
        Some(json!({ "isPinned": true })),
    )
    .await;

    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;
    let titles: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["old", "new", "mid"]);
}

#[tokio::test]
async fn all_route_returns_the_raw_collection() {
    let app = app();
    let kept = create_note(&app, json!({ "title": "kept" })).await;
    let binned = create_note(&app, json!({ "title": "binned" })).await;
    send(
        &app,
        Method::DELETE,
        &format!("/api/notes/{}", binned["id"].as_str().unwrap()),
        None,
    )
    .await;

    let (status, all) = send(&app, Method::GET, "/api/notes/all", None).await;
    assert_eq!(status, StatusCode::OK);
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|n| n["id"] == kept["id"]));
}
