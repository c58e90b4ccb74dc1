//! # Local Storage Repository
//!
//! A key/value table with the semantics of the browser's `localStorage`:
//! string keys, string values, last write wins.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  local_storage                                                          │
//! │  ┌──────────────────────┬──────────────────────────┬────────────────┐  │
//! │  │ key (PK)             │ value                    │ updated_at     │  │
//! │  ├──────────────────────┼──────────────────────────┼────────────────┤  │
//! │  │ restaurant-storage   │ {"menuItems":[...],...}  │ 2026-10-17T... │  │
//! │  └──────────────────────┴──────────────────────────┴────────────────┘  │
//! │                                                                         │
//! │  set_item = INSERT ... ON CONFLICT(key) DO UPDATE                      │
//! │  No versions, no merge, no partial update.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `local_storage` table.
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    pool: SqlitePool,
}

impl LocalStorageRepository {
    /// Creates a new LocalStorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LocalStorageRepository { pool }
    }

    /// Returns the value stored under `key`, if any.
    pub async fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub async fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing local storage item");

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes `key`. Returns whether anything was removed.
    pub async fn remove_item(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    /// Removes every key. Returns the number of rows deleted.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM local_storage")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
