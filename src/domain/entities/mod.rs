//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], plus the [`NewUrlMapping`]
//! input used to create one. Entities are plain data without behaviour; the
//! short URL is derived from the code and configuration, never stored.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
