mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use hashlink::api::handlers::health_handler;
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repo) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("store").is_some());
    assert!(json["checks"].get("cache").is_some());
}

#[tokio::test]
async fn test_health_reports_mapping_count() {
    let (server, _repo) = common::create_test_server();

    server
        .post("/api/item")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status_ok();

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["store"]["message"], "Connected, 1 mappings");
}
