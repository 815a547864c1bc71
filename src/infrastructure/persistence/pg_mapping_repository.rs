//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError, validate_new_mapping};
use crate::utils::code_derivation::CodeFormat;
use crate::utils::db_error::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    url_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(
            row.id,
            row.original_url,
            row.url_code,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness of both fields is enforced by the `url_mappings_original_url_key`
/// and `url_mappings_url_code_key` constraints, so racing inserts are resolved
/// by the database: one commits, the other gets a unique violation.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    code_format: CodeFormat,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, code_format: CodeFormat) -> Self {
        Self { pool, code_format }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError> {
        validate_new_mapping(&new_mapping, &self.code_format)?;

        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (original_url, url_code)
            VALUES ($1, $2)
            RETURNING id, original_url, url_code, created_at, updated_at
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.url_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, url_code, created_at, updated_at
            FROM url_mappings
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_code(&self, url_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, url_code, created_at, updated_at
            FROM url_mappings
            WHERE url_code = $1
            "#,
        )
        .bind(url_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }
}
