//! Integration tests for todo endpoints

mod common;

use axum::http::StatusCode;
use common::{unique_username, TestApp};
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_todo_lifecycle() {
    let app = TestApp::new().await;
    let cookie = app.register_user(&unique_username("alice"), "pw1234").await;

    let created = app
        .post("/todos", json!({"title": "Buy milk"}), Some(&cookie))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["title"], "Buy milk");
    assert_eq!(created.body["data"]["status"], "pending");
    assert_eq!(created.body["data"]["imageList"], json!([]));
    let id = created.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/todos/{}", id);

    let updated = app
        .put(&path, json!({"status": "completed"}), Some(&cookie))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["status"], "completed");
    assert_eq!(updated.body["data"]["title"], "Buy milk");
    assert_ne!(
        updated.body["data"]["updatedAt"],
        created.body["data"]["updatedAt"]
    );

    let fetched = app.get(&path, Some(&cookie)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["status"], "completed");

    let deleted = app.delete(&path, Some(&cookie)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Todo deleted successfully");

    let missing = app.get(&path, Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Todo not found or not authorized");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_returns_only_own_todos_in_creation_order() {
    let app = TestApp::new().await;
    let alice = app.register_user(&unique_username("alice"), "pw1234").await;
    let bob = app.register_user(&unique_username("bob"), "pw1234").await;

    for title in ["first", "second", "third"] {
        let response = app.post("/todos", json!({"title": title}), Some(&alice)).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
    app.post("/todos", json!({"title": "bob's"}), Some(&bob)).await;

    let listed = app.get("/todos", Some(&alice)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let titles: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_other_users_todo_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.register_user(&unique_username("alice"), "pw1234").await;
    let bob = app.register_user(&unique_username("bob"), "pw1234").await;

    let created = app
        .post("/todos", json!({"title": "private"}), Some(&alice))
        .await;
    let path = format!("/todos/{}", created.body["data"]["id"].as_str().unwrap());

    assert_eq!(app.get(&path, Some(&bob)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.put(&path, json!({"title": "hijacked"}), Some(&bob)).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.delete(&path, Some(&bob)).await.status, StatusCode::NOT_FOUND);

    let still_there = app.get(&path, Some(&alice)).await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.body["data"]["title"], "private");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let cookie = app.register_user(&unique_username("val"), "pw1234").await;

    let missing_title = app.post("/todos", json!({}), Some(&cookie)).await;
    assert_eq!(missing_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_title.body["message"], "Title is required");

    let long_title = app
        .post("/todos", json!({"title": "x".repeat(101)}), Some(&cookie))
        .await;
    assert_eq!(long_title.status, StatusCode::BAD_REQUEST);

    let bad_status = app
        .post("/todos", json!({"title": "ok", "status": "archived"}), Some(&cookie))
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_ignores_unknown_fields_and_keeps_images() {
    let app = TestApp::new().await;
    let cookie = app.register_user(&unique_username("img"), "pw1234").await;

    let created = app
        .post(
            "/todos",
            json!({
                "title": "Photos",
                "description": "  holiday  ",
                "imageList": ["https://img.example/a.png", "https://img.example/b.png"],
                "status": "in-progress"
            }),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["description"], "holiday");
    let path = format!("/todos/{}", created.body["data"]["id"].as_str().unwrap());

    let updated = app
        .put(
            &path,
            json!({"title": "Album", "userId": "00000000-0000-0000-0000-000000000000"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["title"], "Album");
    assert_eq!(updated.body["data"]["userId"], created.body["data"]["userId"]);
    assert_eq!(
        updated.body["data"]["imageList"],
        json!(["https://img.example/a.png", "https://img.example/b.png"])
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_invalid_id_is_bad_request() {
    let app = TestApp::new().await;
    let cookie = app.register_user(&unique_username("ids"), "pw1234").await;

    let response = app.get("/todos/not-an-id", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid todo ID");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_todos_require_session() {
    let app = TestApp::new().await;

    let response = app.get("/todos", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Not authenticated");
    assert!(response.set_cookie.is_none());
}
