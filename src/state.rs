//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ResolverService, ShortenerService};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_derivation::CodeFormat;
use crate::utils::short_url::ShortUrlTemplate;

/// Services and settings shared by all request handlers.
///
/// Cheap to clone: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService>,
    pub resolver_service: Arc<ResolverService>,
    pub repository: Arc<dyn MappingRepository>,
    pub cache: Arc<dyn CacheService>,
    /// Redirect target for well-formed codes that resolve to nothing.
    pub fallback_url: Arc<str>,
}

impl AppState {
    /// Wires both services over one store and one cache.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        code_format: CodeFormat,
        short_urls: ShortUrlTemplate,
        fallback_url: impl Into<Arc<str>>,
    ) -> Self {
        let shortener_service = Arc::new(ShortenerService::new(
            repository.clone(),
            code_format.clone(),
            short_urls,
        ));
        let resolver_service = Arc::new(ResolverService::new(
            repository.clone(),
            cache.clone(),
            code_format,
        ));

        Self {
            shortener_service,
            resolver_service,
            repository,
            cache,
            fallback_url: fallback_url.into(),
        }
    }
}
