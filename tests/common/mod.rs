#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use hashlink::domain::repositories::MappingRepository;
use hashlink::infrastructure::cache::NullCache;
use hashlink::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository};
use hashlink::routes::app_router;
use hashlink::state::AppState;
use hashlink::utils::code_derivation::CodeFormat;
use hashlink::utils::short_url::ShortUrlTemplate;

pub const FALLBACK_URL: &str = "http://example.com/";

pub fn create_state(repository: Arc<dyn MappingRepository>) -> AppState {
    AppState::new(
        repository,
        Arc::new(NullCache::new()),
        CodeFormat::default(),
        ShortUrlTemplate::new("http", "localhost"),
        FALLBACK_URL,
    )
}

pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::default());
    (create_state(repository.clone()), repository)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    create_state(Arc::new(PgMappingRepository::new(
        Arc::new(pool),
        CodeFormat::default(),
    )))
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryMappingRepository>) {
    let (state, repository) = create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repository)
}

pub async fn insert_mapping(pool: &PgPool, url: &str, code: &str) {
    sqlx::query("INSERT INTO url_mappings (original_url, url_code) VALUES ($1, $2)")
        .bind(url)
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}
