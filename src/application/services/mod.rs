//! Business logic services for the application layer.

pub mod resolver_service;
pub mod shortener_service;

pub use resolver_service::{Resolution, ResolverService};
pub use shortener_service::{ShortenedUrl, ShortenerService};
