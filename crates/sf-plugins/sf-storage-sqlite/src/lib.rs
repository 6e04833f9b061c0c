//! # sf-storage-sqlite Implementation
//!
//! Keeps key-value slots in a single SQLite table. Each slot is one row,
//! upserted whole on every write.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sf_core::traits::KeyValueStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_slots (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Connects (creating the database file if needed) and ensures the table exists.
    ///
    /// # Developer Note
    /// An in-memory database lives per connection, so `:memory:` URLs get a
    /// pool of exactly one connection; otherwise every query could see a
    /// different, empty database.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let max = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max)
            .connect_with(options)
            .await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        tracing::info!(url, "sqlite slot storage ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_slots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
