use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Postgres, Sqlite};
use std::str::FromStr;

use crate::storage::errors::StorageError;

#[derive(Clone, Debug)]
pub struct SqliteDataStore {
    pub(super) pool: sqlx::SqlitePool,
}

#[derive(Clone, Debug)]
pub struct PostgresDataStore {
    pub(super) pool: sqlx::PgPool,
}

/// Backing store for persistent tables.
///
/// Callers dispatch on whichever accessor returns `Some`.
pub trait DataStore: Send + Sync {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>>;
    fn as_postgres(&self) -> Option<&Pool<Postgres>>;
}

impl DataStore for SqliteDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        Some(&self.pool)
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        None
    }
}

impl DataStore for PostgresDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        None
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        Some(&self.pool)
    }
}

impl SqliteDataStore {
    /// Lazily connected pool for a file (or any non-memory) SQLite URL.
    pub fn connect_lazy(url: &str) -> Result<Self, StorageError> {
        let opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true);

        Ok(Self {
            pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
        })
    }

    /// In-memory database pinned to a single connection.
    ///
    /// Every SQLite connection to `:memory:` opens its own database, so the pool
    /// keeps exactly one connection alive for the lifetime of the store.
    pub fn in_memory() -> Result<Self, StorageError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::Config(format!("Invalid SQLite URL: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(opts);

        Ok(Self { pool })
    }
}

impl PostgresDataStore {
    pub fn connect_lazy(url: &str) -> Result<Self, StorageError> {
        let pool = sqlx::PgPool::connect_lazy(url)
            .map_err(|e| StorageError::Config(format!("Failed to create Postgres pool: {e}")))?;
        Ok(Self { pool })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_store_accessors() {
        let store = SqliteDataStore::in_memory().unwrap();
        assert!(store.as_sqlite().is_some());
        assert!(store.as_postgres().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_store_keeps_state_between_queries() {
        let store = SqliteDataStore::in_memory().unwrap();
        let pool = store.as_sqlite().unwrap();

        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (v) VALUES (1)")
            .execute(pool)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
