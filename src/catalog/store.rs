//! In-memory product store.
//!
//! # Responsibilities
//! - Own the id → record map for the lifetime of the server
//! - Allocate ids (max numeric id + 1)
//! - Apply create/replace/patch/delete atomically
//!
//! # Design Decisions
//! - One `RwLock` around the whole map; every mutation holds the write lock
//!   from lookup to insert, so concurrent creates never hand out the same id
//! - Listing order is insertion order; deletes keep the order of the rest

use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::catalog::model::{Product, ProductId, ProductRecord};
use crate::catalog::payload::ProductPatch;
use crate::observability::metrics;

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(String),

    #[error("no product id left after {0}")]
    IdSpaceExhausted(u64),
}

/// Shared product store. Wrap in `Arc` to hand it to the HTTP layer.
#[derive(Debug, Default)]
pub struct ProductStore {
    inner: RwLock<IndexMap<ProductId, ProductRecord>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `products`, in iteration order.
    pub fn with_products<I>(products: I) -> Self
    where
        I: IntoIterator<Item = (ProductId, ProductRecord)>,
    {
        Self {
            inner: RwLock::new(products.into_iter().collect()),
        }
    }

    /// All records in store order.
    pub async fn list(&self) -> Vec<ProductRecord> {
        self.inner.read().await.values().cloned().collect()
    }

    /// Look up a record by its exact id string.
    pub async fn get(&self, id: &str) -> Option<ProductRecord> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Store `record` under the next free id.
    pub async fn create(&self, record: ProductRecord) -> Result<Product, StoreError> {
        let mut map = self.inner.write().await;
        let id = next_id(&map)?;
        map.insert(id.clone(), record.clone());
        metrics::record_store_size(map.len());
        tracing::debug!(id = %id, name = %record.name, "Id allocated");
        Ok(Product::new(id, record))
    }

    /// Overwrite an existing record.
    pub async fn replace(&self, id: &str, record: ProductRecord) -> Result<Product, StoreError> {
        let mut map = self.inner.write().await;
        let (_, key, slot) = map
            .get_full_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = record.clone();
        Ok(Product::new(key.clone(), record))
    }

    /// Shallow-merge `patch` into an existing record.
    pub async fn patch(&self, id: &str, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut map = self.inner.write().await;
        let (_, key, slot) = map
            .get_full_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(slot);
        Ok(Product::new(key.clone(), slot.clone()))
    }

    /// Remove a record, returning it.
    pub async fn delete(&self, id: &str) -> Result<Product, StoreError> {
        let mut map = self.inner.write().await;
        let (key, record) = map
            .shift_remove_entry(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        metrics::record_store_size(map.len());
        Ok(Product::new(key, record))
    }
}

fn next_id(map: &IndexMap<ProductId, ProductRecord>) -> Result<ProductId, StoreError> {
    match map.keys().map(ProductId::value).max() {
        None => Ok(ProductId::from(1)),
        Some(max) => max
            .checked_add(1)
            .map(ProductId::from)
            .ok_or(StoreError::IdSpaceExhausted(max)),
    }
}
