//! Domain records and the `Resource` trait they share
//!
//! Every record stored by the backend implements [`Resource`], which gives
//! the storage layer the collection name, the surrogate id, the creation
//! timestamp, the set of unique fields, and a wire-named string projection
//! used for lookups and uniqueness checks.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod feedback;
pub mod order;
pub mod product;
pub mod user;
pub mod warehouse;

pub use feedback::{Feedback, FeedbackInput};
pub use order::{DeliveryOrder, DeliveryOrderInput, DeliveryStatus};
pub use product::{Product, ProductInput};
pub use user::{UserAccount, UserAccountInput};
pub use warehouse::{WarehouseRequest, WarehouseRequestInput};

/// Base trait for all stored records.
///
/// All records have:
/// - id: system-assigned surrogate identifier, stable for the record's life
/// - created_at: set once at creation, immutable
///
/// `field_str` projects a record field by its wire-level (camelCase) name
/// so the store can run `find` and uniqueness checks without knowing the
/// concrete type. Only the fields a record is looked up by need to be
/// projected.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Collection name used by the document store (e.g. "deliveryorders")
    fn resource_name() -> &'static str;

    /// Singular, human-readable name used in messages (e.g. "delivery order")
    fn resource_name_singular() -> &'static str;

    /// The surrogate identifier for this record
    fn id(&self) -> Uuid;

    /// The creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Wire-named fields that must be unique across the collection.
    ///
    /// The store is the authoritative enforcer of these; any handler-level
    /// pre-check is a fast path only.
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Project a field by wire name for find/uniqueness queries.
    fn field_str(&self, field: &str) -> Option<String> {
        let _ = field;
        None
    }
}
