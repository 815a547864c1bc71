mod common;

use hashlink::domain::repositories::MappingRepository;
use serde_json::json;

#[tokio::test]
async fn test_shorten_json_success() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/item")
        .json(&json!({ "url": "https://example.com/a/b" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["originalUrl"], "https://example.com/a/b");
    assert_eq!(json["shortUrl"], "http://localhost/7R1BN2R7");
}

#[tokio::test]
async fn test_shorten_form_success() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/item")
        .form(&[("url", "https://example.com")])
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["originalUrl"], "https://example.com");
    assert_eq!(json["shortUrl"], "http://localhost/EAaArVRs");
}

#[tokio::test]
async fn test_shorten_same_url_twice_is_idempotent() {
    let (server, repo) = common::create_test_server();

    let first = server
        .post("/api/item")
        .json(&json!({ "url": "https://www.rust-lang.org/learn" }))
        .await;
    let second = server
        .post("/api/item")
        .json(&json!({ "url": "https://www.rust-lang.org/learn" }))
        .await;

    first.assert_status_ok();
    second.assert_status_ok();

    assert_eq!(
        first.json::<serde_json::Value>(),
        second.json::<serde_json::Value>()
    );
    assert_eq!(
        second.json::<serde_json::Value>()["shortUrl"],
        "http://localhost/I8SZAHYj"
    );
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_code_may_contain_slash() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/item")
        .json(&json!({ "url": "https://example.com/page/5" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["shortUrl"],
        "http://localhost/vwbc/TZB"
    );
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (server, repo) = common::create_test_server();

    let response = server.post("/api/item").json(&json!({})).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "missing_input");
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_unsupported_body_is_missing_input() {
    let (server, _repo) = common::create_test_server();

    let response = server.post("/api/item").text("https://example.com").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "missing_input"
    );
}

#[tokio::test]
async fn test_shorten_malformed_url() {
    let (server, repo) = common::create_test_server();

    for url in ["not a url", "example.com", "ftp:/broken", "http://exa mple.com"] {
        let response = server.post("/api/item").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "malformed_url", "{url}");
        assert!(json["error"]["details"]["reason"].is_string(), "{url}");
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_invalid_json_body() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/item")
        .content_type("application/json")
        .bytes("{\"url\":".into())
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "bad_request"
    );
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_codes() {
    let (server, repo) = common::create_test_server();

    let four = server
        .post("/api/item")
        .json(&json!({ "url": "https://example.com/page/4" }))
        .await;
    let five = server
        .post("/api/item")
        .json(&json!({ "url": "https://example.com/page/5" }))
        .await;

    assert_eq!(
        four.json::<serde_json::Value>()["shortUrl"],
        "http://localhost/cDihJ+Tj"
    );
    assert_eq!(
        five.json::<serde_json::Value>()["shortUrl"],
        "http://localhost/vwbc/TZB"
    );
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_requires_scheme() {
    let (server, repo) = common::create_test_server();

    for url in ["example.com/path", "www.google.com", "example.com"] {
        let response = server.post("/api/item").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "malformed_url", "{url}");
        assert_eq!(
            json["error"]["details"]["reason"],
            "Invalid URL format: relative URL without a base",
            "{url}"
        );
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}
