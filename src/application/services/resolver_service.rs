//! Short code resolution.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_derivation::CodeFormat;

/// Outcome of resolving a well-formed short code.
///
/// A miss is a normal outcome, not an error: the HTTP layer sends the client
/// to the configured fallback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    NotFound,
}

/// Service resolving short codes back to original URLs.
pub struct ResolverService {
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
    code_format: CodeFormat,
}

impl ResolverService {
    /// Creates a new resolver service.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        code_format: CodeFormat,
    ) -> Self {
        Self {
            repository,
            cache,
            code_format,
        }
    }

    /// Resolves `url_code` to its original URL.
    ///
    /// # Lookup Order
    ///
    /// 1. Cache (errors are logged and treated as a miss)
    /// 2. Mapping store; a hit is written back to the cache in the background
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingCode`] if no code, or an empty one, is supplied
    /// - [`AppError::MalformedCode`] if the code does not match the configured format
    /// - [`AppError::Storage`] if the store lookup fails
    pub async fn resolve(&self, url_code: Option<&str>) -> Result<Resolution, AppError> {
        let url_code = url_code
            .filter(|code| !code.is_empty())
            .ok_or(AppError::MissingCode)?;

        if !self.code_format.is_valid(url_code) {
            return Err(AppError::malformed_code(url_code));
        }

        match self.cache.get_url(url_code).await {
            Ok(Some(original_url)) => {
                debug!(%url_code, "Cache HIT");
                return Ok(Resolution::Found(original_url));
            }
            Ok(None) => debug!(%url_code, "Cache MISS"),
            Err(e) => warn!(%url_code, "Cache error: {}", e),
        }

        let Some(mapping) = self.repository.find_by_code(url_code).await? else {
            debug!(%url_code, "Short code not found");
            return Ok(Resolution::NotFound);
        };

        // Mappings never change, so the cached entry can't go stale.
        let cache = self.cache.clone();
        let code = mapping.url_code.clone();
        let original_url = mapping.original_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&code, &original_url, None).await {
                error!("Failed to cache URL: {}", e);
            }
        });

        Ok(Resolution::Found(mapping.original_url))
    }
}
