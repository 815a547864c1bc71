//! Data Transfer Objects for API requests and responses.
//!
//! Response field names follow the public wire format (`originalUrl`,
//! `shortUrl`), which is camelCase.

pub mod health;
pub mod shorten;
