//! Translation of SQLx errors into store errors.

use crate::domain::repositories::{MappingField, StoreError};

const ORIGINAL_URL_KEY: &str = "url_mappings_original_url_key";
const URL_CODE_KEY: &str = "url_mappings_url_code_key";
const URL_CODE_FORMAT: &str = "url_mappings_url_code_format";

/// Returns the mapping field whose unique constraint `e` violated, if any.
pub fn unique_violation_field(e: &sqlx::Error) -> Option<MappingField> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(ORIGINAL_URL_KEY) => Some(MappingField::OriginalUrl),
        Some(URL_CODE_KEY) => Some(MappingField::UrlCode),
        _ => None,
    }
}

/// Maps a SQLx error to a [`StoreError`].
///
/// Unique violations on either mapping key become
/// [`StoreError::ConstraintViolation`], the code format CHECK becomes
/// [`StoreError::ValidationFailure`], everything else is a backend failure.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(field) = unique_violation_field(&e) {
        return StoreError::ConstraintViolation { field };
    }

    if let Some(db_err) = e.as_database_error()
        && db_err.is_check_violation()
        && db_err.constraint() == Some(URL_CODE_FORMAT)
    {
        return StoreError::ValidationFailure {
            field: MappingField::UrlCode,
            reason: "rejected by database format constraint".to_string(),
        };
    }

    StoreError::Backend(e.to_string())
}
