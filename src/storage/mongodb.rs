//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides a `MongoStore<T>` implementation of [`DocumentStore`] backed by
//! a MongoDB database via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! Collection-per-resource: each `MongoStore<T>` operates on the collection
//! named by `T::resource_name()` (e.g. "deliveryorders", "users").
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. This keeps UUIDs as strings and
//! DateTimes as ISO 8601 strings, and maps the `id` field to MongoDB's
//! `_id` convention.
//!
//! # Uniqueness
//!
//! `ensure_indexes` creates a unique index named `<field>_unique` for each
//! entry in `T::unique_fields()`. An E11000 duplicate-key write error is
//! mapped back to [`StoreError::Duplicate`], which makes the index — not
//! any handler pre-check — the authoritative duplicate signal.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use uuid::Uuid;

use super::{DocumentStore, StoreError};
use crate::domain::Resource;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// Document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document, StoreError> {
    let bson_val = mongodb::bson::to_bson(&json).map_err(backend_err)?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => {
            return Err(StoreError::Backend {
                backend: "mongodb",
                message: "expected BSON document, got non-object".to_string(),
            });
        }
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain record convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn backend_err(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend {
        backend: "mongodb",
        message: err.to_string(),
    }
}

/// Map a driver error to `StoreError`, recognizing E11000 duplicate-key
/// violations on the unique indexes of `T`.
fn write_err<T: Resource>(err: mongodb::error::Error) -> StoreError {
    use mongodb::error::{ErrorKind, WriteFailure};

    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = &*err.kind {
        if write_error.code == 11000 {
            // Unique indexes are named "<field>_unique" by ensure_indexes,
            // and the server names the violated index in the message.
            let field = T::unique_fields()
                .iter()
                .find(|field| write_error.message.contains(*field))
                .copied()
                .unwrap_or("_id");
            return StoreError::Duplicate {
                field: field.to_string(),
            };
        }
    }

    backend_err(err)
}

// ---------------------------------------------------------------------------
// MongoStore<T>
// ---------------------------------------------------------------------------

/// Generic document storage backed by MongoDB.
///
/// # Type bounds
///
/// `T` must implement:
/// - `Resource` — collection name, id, unique fields
/// - `Serialize` — for serializing the record to BSON
/// - `DeserializeOwned` — for deserializing BSON to the record
#[derive(Clone, Debug)]
pub struct MongoStore<T> {
    database: Database,
    _marker: PhantomData<T>,
}

impl<T> MongoStore<T> {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: PhantomData,
        }
    }
}

impl<T: Resource + Serialize + DeserializeOwned> MongoStore<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    fn record_to_document(record: &T) -> Result<Document, StoreError> {
        let json = serde_json::to_value(record).map_err(backend_err)?;
        json_to_document(json)
    }

    fn document_to_record(doc: Document) -> Result<T, StoreError> {
        let json = document_to_json(doc);
        serde_json::from_value(json).map_err(backend_err)
    }

    /// Create unique indexes for `T::unique_fields()`.
    ///
    /// Idempotent — safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let indexes: Vec<IndexModel> = T::unique_fields()
            .iter()
            .map(|field| {
                IndexModel::builder()
                    .keys(doc! { *field: 1 })
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name(format!("{field}_unique"))
                            .build(),
                    )
                    .build()
            })
            .collect();

        if indexes.is_empty() {
            return Ok(());
        }

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(backend_err)?;

        Ok(())
    }
}

#[async_trait]
impl<T: Resource + Serialize + DeserializeOwned> DocumentStore<T> for MongoStore<T> {
    /// Insert a new record, reading it back to return the stored version.
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let doc = Self::record_to_document(&record)?;
        let id_bson = uuid_bson(&record.id());

        self.collection()
            .insert_one(doc)
            .await
            .map_err(write_err::<T>)?;

        let stored = self
            .collection()
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(backend_err)?
            .ok_or_else(|| StoreError::Backend {
                backend: "mongodb",
                message: "record not found after insert".to_string(),
            })?;

        Self::document_to_record(stored)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(backend_err)?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_record(d)?)),
            None => Ok(None),
        }
    }

    /// List all records, newest first.
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(backend_err)?;

        let docs: Vec<Document> = cursor.try_collect().await.map_err(backend_err)?;

        docs.into_iter().map(Self::document_to_record).collect()
    }

    async fn replace(&self, id: &Uuid, record: T) -> Result<Option<T>, StoreError> {
        let doc = Self::record_to_document(&record)?;
        let id_bson = uuid_bson(id);

        let result = self
            .collection()
            .replace_one(doc! { "_id": &id_bson }, doc)
            .await
            .map_err(write_err::<T>)?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        let updated = self
            .collection()
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(backend_err)?
            .ok_or_else(|| StoreError::Backend {
                backend: "mongodb",
                message: "record not found after replace".to_string(),
            })?;

        Ok(Some(Self::document_to_record(updated)?))
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        let doc = self
            .collection()
            .find_one_and_delete(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(backend_err)?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_record(d)?)),
            None => Ok(None),
        }
    }

    async fn find(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let cursor = self
            .collection()
            .find(doc! { field: value })
            .await
            .map_err(backend_err)?;

        let docs: Vec<Document> = cursor.try_collect().await.map_err(backend_err)?;

        docs.into_iter().map(Self::document_to_record).collect()
    }
}
