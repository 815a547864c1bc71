//! Application layer services implementing business logic.
//!
//! Services validate input, coordinate the mapping store and the cache, and
//! hand HTTP handlers a small, typed API.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Deterministic short URL creation
//! - [`services::resolver_service::ResolverService`] - Short code resolution

pub mod services;
