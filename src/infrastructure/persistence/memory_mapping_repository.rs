//! In-process implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{
    MappingField, MappingRepository, StoreError, validate_new_mapping,
};
use crate::utils::code_derivation::CodeFormat;

#[derive(Default)]
struct Mappings {
    next_id: i64,
    by_code: HashMap<String, UrlMapping>,
    code_by_url: HashMap<String, String>,
}

/// Mapping store held in memory.
///
/// Both uniqueness checks and the insert happen under one write lock, which
/// gives the same guarantee as a unique index: of two racing creates for the
/// same URL or code, exactly one succeeds. Contents are lost on restart, so
/// this backend is meant for development and tests.
pub struct InMemoryMappingRepository {
    mappings: RwLock<Mappings>,
    code_format: CodeFormat,
}

impl InMemoryMappingRepository {
    pub fn new(code_format: CodeFormat) -> Self {
        Self {
            mappings: RwLock::new(Mappings::default()),
            code_format,
        }
    }
}

impl Default for InMemoryMappingRepository {
    fn default() -> Self {
        Self::new(CodeFormat::default())
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError> {
        validate_new_mapping(&new_mapping, &self.code_format)?;

        let mut mappings = self.mappings.write().await;

        if mappings.code_by_url.contains_key(&new_mapping.original_url) {
            return Err(StoreError::ConstraintViolation {
                field: MappingField::OriginalUrl,
            });
        }
        if mappings.by_code.contains_key(&new_mapping.url_code) {
            return Err(StoreError::ConstraintViolation {
                field: MappingField::UrlCode,
            });
        }

        mappings.next_id += 1;
        let now = Utc::now();
        let mapping = UrlMapping::new(
            mappings.next_id,
            new_mapping.original_url,
            new_mapping.url_code,
            now,
            now,
        );

        mappings
            .code_by_url
            .insert(mapping.original_url.clone(), mapping.url_code.clone());
        mappings
            .by_code
            .insert(mapping.url_code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        let mappings = self.mappings.read().await;

        Ok(mappings
            .code_by_url
            .get(original_url)
            .and_then(|code| mappings.by_code.get(code))
            .cloned())
    }

    async fn find_by_code(&self, url_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        Ok(self.mappings.read().await.by_code.get(url_code).cloned())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.mappings.read().await.by_code.len() as i64)
    }
}
