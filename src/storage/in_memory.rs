//! In-memory implementation of DocumentStore for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{DocumentStore, StoreError};
use crate::domain::Resource;

/// In-memory document store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Unique-field collisions are detected under the write lock so the
/// duplicate guarantee matches the database-backed stores.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    records: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_err(detail: impl std::fmt::Display) -> StoreError {
    StoreError::Backend {
        backend: "in-memory",
        message: format!("failed to acquire lock: {detail}"),
    }
}

/// First unique field of `candidate` that collides with another record.
fn colliding_field<T: Resource>(
    records: &HashMap<Uuid, T>,
    candidate: &T,
    exclude: Option<&Uuid>,
) -> Option<&'static str> {
    T::unique_fields().iter().copied().find(|field| {
        let Some(value) = candidate.field_str(field) else {
            return false;
        };
        records.iter().any(|(id, existing)| {
            Some(id) != exclude && existing.field_str(field) == Some(value.clone())
        })
    })
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for InMemoryStore<T> {
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(lock_err)?;

        if let Some(field) = colliding_field(&records, &record, None) {
            return Err(StoreError::Duplicate {
                field: field.to_string(),
            });
        }

        records.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        let records = self.records.read().map_err(lock_err)?;
        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().map_err(lock_err)?;
        let mut all: Vec<T> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    async fn replace(&self, id: &Uuid, record: T) -> Result<Option<T>, StoreError> {
        let mut records = self.records.write().map_err(lock_err)?;

        if !records.contains_key(id) {
            return Ok(None);
        }
        if let Some(field) = colliding_field(&records, &record, Some(id)) {
            return Err(StoreError::Duplicate {
                field: field.to_string(),
            });
        }

        records.insert(*id, record.clone());
        Ok(Some(record))
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        let mut records = self.records.write().map_err(lock_err)?;
        Ok(records.remove(id))
    }

    async fn find(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().map_err(lock_err)?;
        Ok(records
            .values()
            .filter(|record| record.field_str(field).as_deref() == Some(value))
            .cloned()
            .collect())
    }
}
