//! Year-record cache over the document store
//!
//! Records live in the `nostalgia_data` collection keyed by the decimal year.
//! Entries never expire and are only ever replaced wholesale.

use nostalgia_common::DocumentStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::models::{NostalgiaRecord, YearKey};

/// Collection holding cached year records
pub const COLLECTION: &str = "nostalgia_data";

#[derive(Debug, Error)]
#[error("Failed to cache record for {year}: {source}")]
pub struct CacheWriteError {
    pub year: YearKey,
    #[source]
    pub source: nostalgia_common::Error,
}

pub struct CacheStore {
    store: Arc<dyn DocumentStore>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Cached record for `year`, if a valid one exists
    ///
    /// Read failures and documents that fail record validation are logged and
    /// reported as a miss; the caller regenerates and overwrites them.
    pub async fn lookup(&self, year: YearKey) -> Option<NostalgiaRecord> {
        let key = year.to_string();
        let document = match self.store.get(COLLECTION, &key).await {
            Ok(document) => document?,
            Err(e) => {
                warn!(year = %year, backend = self.store.name(), error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_value(document) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(year = %year, error = %e, "Cached document is invalid, treating as miss");
                None
            }
        }
    }

    /// Insert or fully replace the record for `year`
    pub async fn upsert(&self, year: YearKey, record: &NostalgiaRecord) -> Result<(), CacheWriteError> {
        let document = serde_json::to_value(record).map_err(|e| CacheWriteError {
            year,
            source: e.into(),
        })?;

        self.store
            .put(COLLECTION, &year.to_string(), &document)
            .await
            .map_err(|source| CacheWriteError { year, source })
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }
}
