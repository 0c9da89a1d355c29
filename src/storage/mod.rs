//! Storage backends for domain records
//!
//! The service talks to one [`DocumentStore`] per resource. The in-memory
//! backend is the default (development and tests); the MongoDB backend is
//! gated behind the `mongodb_backend` feature.
//!
//! Uniqueness is a store concern: the backend enforces
//! [`Resource::unique_fields`](crate::domain::Resource::unique_fields) and
//! reports collisions as [`StoreError::Duplicate`]. Handler-level duplicate
//! pre-checks are fast-path conveniences only — under concurrent writers the
//! store constraint is the single source of truth.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::Resource;

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoStore;

/// Errors reported by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write collided with an existing value of a unique field
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: String },

    /// The backend failed to execute the operation
    #[error("{backend} error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
}

/// Document-database CRUD over a single resource collection.
///
/// Implementations are storage-agnostic from the caller's perspective: one
/// record per surrogate id, per-document atomic writes, no multi-document
/// transactions.
#[async_trait]
pub trait DocumentStore<T: Resource>: Send + Sync {
    /// Insert a new record, enforcing the resource's unique fields.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Fetch a record by surrogate id.
    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError>;

    /// List all records, newest first.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Replace a record by surrogate id; `None` if no record matched.
    async fn replace(&self, id: &Uuid, record: T) -> Result<Option<T>, StoreError>;

    /// Remove a record by surrogate id, returning it; `None` if absent.
    async fn remove(&self, id: &Uuid) -> Result<Option<T>, StoreError>;

    /// Find records whose wire-named `field` equals `value` exactly.
    async fn find(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError>;
}
