//! URL shortening engine.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_derivation::CodeFormat;
use crate::utils::short_url::ShortUrlTemplate;
use crate::utils::url_validator::validate_url;

/// Result of a successful shorten request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub original_url: String,
    pub url_code: String,
    pub short_url: String,
}

/// Service turning original URLs into short URLs.
///
/// Codes are derived from URL content, so the service keeps no state of its
/// own: deduplication comes from the store lookup and uniqueness from the
/// store's constraints.
pub struct ShortenerService {
    repository: Arc<dyn MappingRepository>,
    code_format: CodeFormat,
    short_urls: ShortUrlTemplate,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        code_format: CodeFormat,
        short_urls: ShortUrlTemplate,
    ) -> Self {
        Self {
            repository,
            code_format,
            short_urls,
        }
    }

    /// Shortens `original_url`, creating its mapping on first submission.
    ///
    /// # Flow
    ///
    /// 1. Reject a missing or malformed URL
    /// 2. Return the existing mapping if the URL was seen before (no write)
    /// 3. Otherwise derive the code and create the mapping
    ///
    /// When the create hits a uniqueness conflict, the store is read once more:
    /// if a concurrent request already stored this exact URL under the same
    /// code, its mapping is returned. Any other conflict means two distinct
    /// URLs share a truncated digest; that is reported, never repaired.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingInput`] if `original_url` is `None`
    /// - [`AppError::MalformedUrl`] if it fails the URL predicate
    /// - [`AppError::PersistenceFailure`] if the store refuses the new mapping
    /// - [`AppError::Storage`] if a lookup fails
    pub async fn shorten(&self, original_url: Option<String>) -> Result<ShortenedUrl, AppError> {
        let original_url = original_url.ok_or(AppError::MissingInput)?;

        validate_url(&original_url).map_err(|e| AppError::malformed_url(e.to_string()))?;

        if let Some(existing) = self
            .repository
            .find_by_original_url(&original_url)
            .await?
        {
            debug!(url_code = %existing.url_code, "URL already shortened");
            return Ok(self.to_shortened(existing));
        }

        let url_code = self.code_format.derive(&original_url);
        let new_mapping = NewUrlMapping::new(original_url.clone(), url_code.clone());

        match self.repository.create(new_mapping).await {
            Ok(mapping) => {
                info!(url_code = %mapping.url_code, "Created short URL");
                Ok(self.to_shortened(mapping))
            }
            Err(StoreError::ConstraintViolation { field }) => {
                match self.repository.find_by_original_url(&original_url).await? {
                    Some(winner) if winner.url_code == url_code => {
                        debug!(%url_code, "Concurrent request stored the same URL first");
                        Ok(self.to_shortened(winner))
                    }
                    _ => {
                        warn!(%url_code, %field, "Short code collision between distinct URLs");
                        Err(AppError::PersistenceFailure {
                            source: StoreError::ConstraintViolation { field },
                        })
                    }
                }
            }
            Err(source) => Err(AppError::PersistenceFailure { source }),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, url_code: &str) -> String {
        self.short_urls.compose(url_code)
    }

    fn to_shortened(&self, mapping: UrlMapping) -> ShortenedUrl {
        ShortenedUrl {
            short_url: self.short_url(&mapping.url_code),
            original_url: mapping.original_url,
            url_code: mapping.url_code,
        }
    }
}
