//! Repository trait definitions for the domain layer.
//!
//! The [`MappingRepository`] trait abstracts the mapping store. Concrete
//! implementations live in `crate::infrastructure::persistence`:
//!
//! - PostgreSQL, with unique constraints enforcing the bijection
//! - In-memory, with check-and-insert under a single write lock
//!
//! A mock implementation is generated via `mockall` for unit tests.

pub mod mapping_repository;

pub use mapping_repository::{MappingField, MappingRepository, StoreError, validate_new_mapping};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
