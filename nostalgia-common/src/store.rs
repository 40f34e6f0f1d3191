//! Document persistence collaborator
//!
//! Key/document storage shared by every part of the nostalgia system. Documents
//! are grouped by collection (e.g. `nostalgia_data`, `users`) and addressed by a
//! string key inside it. `put` is insert-or-replace: it never merges with an
//! existing document.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::Result;

/// Key/document persistence
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Fetch a document; `Ok(None)` when the key is absent
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;

    /// Insert or fully replace a document
    async fn put(&self, collection: &str, key: &str, value: &Value) -> Result<()>;
}

/// In-process document store
///
/// Sharded concurrent map: writers to different keys do not contend, writers to
/// the same key are serialised by the owning shard.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<(String, String), Value>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all collections
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        Ok(self
            .documents
            .get(&(collection.to_string(), key.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, collection: &str, key: &str, value: &Value) -> Result<()> {
        self.documents
            .insert((collection.to_string(), key.to_string()), value.clone());
        Ok(())
    }
}
