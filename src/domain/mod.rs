//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The URL mapping data structures
//! - [`repositories`] - The mapping store trait and its error type
//!
//! The domain layer has no dependency on the HTTP layer or on any concrete
//! database; stores implement [`repositories::MappingRepository`].

pub mod entities;
pub mod repositories;
