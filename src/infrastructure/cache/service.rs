//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of short code → original URL, consulted before the mapping store.
///
/// Mappings never change once created, so entries only leave the cache by TTL.
/// Implementations must be fail-open: a cache failure degrades to a store
/// lookup and never fails a resolution.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached original URL for a short code.
    ///
    /// `Ok(None)` on a miss.
    async fn get_url(&self, url_code: &str) -> CacheResult<Option<String>>;

    /// Stores a code → URL entry, using the implementation's default TTL when
    /// `ttl_seconds` is `None`.
    async fn set_url(
        &self,
        url_code: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
