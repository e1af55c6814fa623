//! Initial store contents.
//!
//! A seed file is a JSON object mapping ids to records:
//! `{"1": {"name": "Laptop", "price": 1200}}`. Entries keep file order.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::model::{Price, ProductId, ProductRecord};
use crate::catalog::payload::{self, PayloadError};
use crate::catalog::store::ProductStore;
use crate::config::StoreConfig;

/// Why a seed file could not be used.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file is not a JSON object of products: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed entry has invalid id {0:?}")]
    InvalidId(String),

    #[error("seed entry {id}: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: PayloadError,
    },
}

/// The built-in catalog used when no seed file is configured.
pub fn default_products() -> Vec<(ProductId, ProductRecord)> {
    vec![
        (ProductId::from(1), ProductRecord::new("Laptop", Price::from(1200))),
        (ProductId::from(2), ProductRecord::new("Mouse", Price::from(25))),
        (ProductId::from(3), ProductRecord::new("Keyboard", Price::from(75))),
    ]
}

/// Parse seed file contents, validating every entry.
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<(ProductId, ProductRecord)>, SeedError> {
    let entries: IndexMap<String, Value> = serde_json::from_slice(bytes)?;
    entries
        .into_iter()
        .map(|(raw_id, value)| {
            let id = ProductId::parse(&raw_id).ok_or_else(|| SeedError::InvalidId(raw_id.clone()))?;
            let record = match value {
                Value::Object(fields) => payload::record_from_object(&fields),
                _ => Err(PayloadError::InvalidJson),
            }
            .map_err(|source| SeedError::InvalidRecord { id: raw_id, source })?;
            Ok::<_, SeedError>((id, record))
        })
        .collect()
}

/// Read and parse a seed file.
pub async fn load_seed(path: &Path) -> Result<Vec<(ProductId, ProductRecord)>, SeedError> {
    let bytes = tokio::fs::read(path).await?;
    parse_seed(&bytes)
}

/// Build the startup store from configuration.
///
/// A configured seed file that is missing or malformed yields an empty store.
pub async fn build_store(config: &StoreConfig) -> ProductStore {
    let products = match &config.seed_path {
        Some(path) => match load_seed(path).await {
            Ok(products) => {
                tracing::info!(path = %path.display(), count = products.len(), "Seed file loaded");
                products
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Seed file unusable, starting with an empty store"
                );
                Vec::new()
            }
        },
        None if config.builtin_seed => default_products(),
        None => Vec::new(),
    };
    ProductStore::with_products(products)
}
