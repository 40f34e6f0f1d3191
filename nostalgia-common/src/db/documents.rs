//! SQLite-backed document store

use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::store::DocumentStore;
use crate::Result;

/// `DocumentStore` over the `documents` table
///
/// Documents are stored as JSON text. `put` is one upsert statement, so a
/// document is either fully replaced or left untouched.
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM documents WHERE collection = ? AND key = ?")
                .bind(collection)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((text,)) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, collection: &str, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(collection, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(text)
        .bind(crate::time::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
