//! PostgreSQL store tests.
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a
//! server where `sqlx::test` may create scratch databases.

mod common;

use axum_test::TestServer;
use hashlink::domain::entities::NewUrlMapping;
use hashlink::domain::repositories::{MappingField, MappingRepository, StoreError};
use hashlink::infrastructure::persistence::PgMappingRepository;
use hashlink::routes::app_router;
use hashlink::server::run_migrations;
use hashlink::utils::code_derivation::CodeFormat;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

fn create_repo(pool: PgPool) -> PgMappingRepository {
    PgMappingRepository::new(Arc::new(pool), CodeFormat::default())
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_mapping(pool: PgPool) {
    let repo = create_repo(pool);

    let result = repo
        .create(NewUrlMapping::new("https://example.com/a/b", "7R1BN2R7"))
        .await;

    assert!(result.is_ok());
    let mapping = result.unwrap();
    assert!(mapping.id > 0);
    assert_eq!(mapping.original_url, "https://example.com/a/b");
    assert_eq!(mapping.url_code, "7R1BN2R7");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_original_url_and_code(pool: PgPool) {
    common::insert_mapping(&pool, "https://example.com", "EAaArVRs").await;
    let repo = create_repo(pool);

    let by_url = repo
        .find_by_original_url("https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.url_code, "EAaArVRs");

    let by_code = repo.find_by_code("EAaArVRs").await.unwrap().unwrap();
    assert_eq!(by_code.id, by_url.id);

    assert!(repo.find_by_code("ZZZZZZZZ").await.unwrap().is_none());
    assert!(
        repo.find_by_original_url("https://example.com/")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_original_url_is_constraint_violation(pool: PgPool) {
    let repo = create_repo(pool);

    repo.create(NewUrlMapping::new("https://example.com/a/b", "7R1BN2R7"))
        .await
        .unwrap();

    let result = repo
        .create(NewUrlMapping::new("https://example.com/a/b", "7R1BN2R7"))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ConstraintViolation {
            field: MappingField::OriginalUrl
        })
    ));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_code_is_constraint_violation(pool: PgPool) {
    let repo = create_repo(pool);

    repo.create(NewUrlMapping::new("https://example.com/a/b", "7R1BN2R7"))
        .await
        .unwrap();

    let result = repo
        .create(NewUrlMapping::new("https://example.com/other", "7R1BN2R7"))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ConstraintViolation {
            field: MappingField::UrlCode
        })
    ));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_invalid_code_is_validation_failure(pool: PgPool) {
    let repo = create_repo(pool);

    let result = repo
        .create(NewUrlMapping::new("https://example.com", "bad-code"))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ValidationFailure {
            field: MappingField::UrlCode,
            ..
        })
    ));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_count(pool: PgPool) {
    common::insert_mapping(&pool, "https://example.com/page/4", "cDihJ+Tj").await;
    common::insert_mapping(&pool, "https://example.com/page/5", "vwbc/TZB").await;
    let repo = create_repo(pool);

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_shorten_and_redirect_end_to_end(pool: PgPool) {
    let server = TestServer::new(app_router(common::create_pg_state(pool))).unwrap();

    let response = server
        .post("/api/item")
        .json(&json!({ "url": "https://www.rust-lang.org/learn" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["shortUrl"],
        "http://localhost/I8SZAHYj"
    );

    let response = server.get("/I8SZAHYj").await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://www.rust-lang.org/learn");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL"]
async fn test_run_migrations_prepares_fresh_database(pool: PgPool) {
    run_migrations(&pool).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = create_repo(pool);
    let mapping = repo
        .create(NewUrlMapping::new("https://example.com/a/b", "7R1BN2R7"))
        .await
        .unwrap();

    assert_eq!(mapping.url_code, "7R1BN2R7");
    assert_eq!(repo.count().await.unwrap(), 1);
}
