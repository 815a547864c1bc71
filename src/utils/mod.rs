//! Utility functions for code derivation, URL checks and persistence errors.
//!
//! - [`code_derivation`] - SHA-256/Base64 short codes and their format
//! - [`url_validator`] - Well-formed URL predicate
//! - [`short_url`] - Short URL composition
//! - [`db_error`] - SQLx error translation

pub mod code_derivation;
pub mod db_error;
pub mod short_url;
pub mod url_validator;
