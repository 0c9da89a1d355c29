//! Application state shared across handlers

use std::sync::Arc;

use crate::domain::{DeliveryOrder, Feedback, Product, UserAccount, WarehouseRequest};
use crate::notify::Notifier;
use crate::storage::{DocumentStore, InMemoryStore};

/// One store per resource plus the notification dispatcher.
///
/// Stores are trait objects so the same handlers run against the in-memory
/// backend (tests, development) and MongoDB.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn DocumentStore<DeliveryOrder>>,
    pub users: Arc<dyn DocumentStore<UserAccount>>,
    pub products: Arc<dyn DocumentStore<Product>>,
    pub warehouse_requests: Arc<dyn DocumentStore<WarehouseRequest>>,
    pub feedback: Arc<dyn DocumentStore<Feedback>>,
    pub notifier: Arc<Notifier>,
}

impl AppState {
    /// State backed entirely by in-memory stores.
    pub fn in_memory(notifier: Arc<Notifier>) -> Self {
        Self {
            orders: Arc::new(InMemoryStore::new()),
            users: Arc::new(InMemoryStore::new()),
            products: Arc::new(InMemoryStore::new()),
            warehouse_requests: Arc::new(InMemoryStore::new()),
            feedback: Arc::new(InMemoryStore::new()),
            notifier,
        }
    }

    /// State backed by MongoDB collections; creates the unique indexes the
    /// duplicate detection relies on.
    #[cfg(feature = "mongodb_backend")]
    pub async fn mongo(
        database: mongodb::Database,
        notifier: Arc<Notifier>,
    ) -> Result<Self, crate::storage::StoreError> {
        use crate::storage::MongoStore;

        let orders = MongoStore::<DeliveryOrder>::new(database.clone());
        orders.ensure_indexes().await?;
        let users = MongoStore::<UserAccount>::new(database.clone());
        users.ensure_indexes().await?;

        Ok(Self {
            orders: Arc::new(orders),
            users: Arc::new(users),
            products: Arc::new(MongoStore::<Product>::new(database.clone())),
            warehouse_requests: Arc::new(MongoStore::<WarehouseRequest>::new(database.clone())),
            feedback: Arc::new(MongoStore::<Feedback>::new(database)),
            notifier,
        })
    }
}
