//! Repository trait for URL mapping storage.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::utils::code_derivation::CodeFormat;
use crate::utils::url_validator::validate_url;

/// One of the two unique fields of a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MappingField {
    OriginalUrl,
    UrlCode,
}

impl fmt::Display for MappingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OriginalUrl => write!(f, "originalUrl"),
            Self::UrlCode => write!(f, "urlCode"),
        }
    }
}

/// Errors returned by a mapping store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Another mapping already holds this value of a unique field.
    #[error("Unique constraint violation on {field}")]
    ConstraintViolation { field: MappingField },

    /// The record failed the store's own format checks.
    #[error("Invalid {field}: {reason}")]
    ValidationFailure { field: MappingField, reason: String },

    /// The backend could not serve the request.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Store interface for URL mappings.
///
/// Stores enforce uniqueness of both `original_url` and `url_code`
/// atomically at write time: of two racing creates for the same value,
/// exactly one succeeds. There are no update or delete operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping and returns it with its store-assigned fields.
    ///
    /// The record is durable once this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ValidationFailure`] if the URL is not well formed
    /// or the code does not match the configured [`CodeFormat`].
    ///
    /// Returns [`StoreError::ConstraintViolation`] if either field is already
    /// present in the store.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError>;

    /// Finds the mapping for an original URL.
    ///
    /// The URL is compared byte for byte; no normalization is applied.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds the mapping for a short code.
    async fn find_by_code(&self, url_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, StoreError>;
}

/// Format checks every store applies before inserting a record.
///
/// Applied regardless of caller, so a store never holds a record that breaks
/// the URL or code format.
///
/// # Errors
///
/// Returns [`StoreError::ValidationFailure`] naming the first offending field.
pub fn validate_new_mapping(
    new_mapping: &NewUrlMapping,
    code_format: &CodeFormat,
) -> Result<(), StoreError> {
    validate_url(&new_mapping.original_url).map_err(|e| StoreError::ValidationFailure {
        field: MappingField::OriginalUrl,
        reason: e.to_string(),
    })?;

    if !code_format.is_valid(&new_mapping.url_code) {
        return Err(StoreError::ValidationFailure {
            field: MappingField::UrlCode,
            reason: format!(
                "expected {} characters of [A-Za-z0-9+/]",
                code_format.length()
            ),
        });
    }

    Ok(())
}
