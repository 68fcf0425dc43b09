//! Data store selection

use std::{env, sync::Arc, sync::LazyLock};

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};
use crate::storage::errors::StorageError;

/// Table prefix from environment variable
pub static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_default());

/// Build the data store described by `GENERIC_DATA_STORE_TYPE` and
/// `GENERIC_DATA_STORE_URL`.
pub fn data_store_from_env() -> Result<Arc<dyn DataStore>, StorageError> {
    let store_type = env::var("GENERIC_DATA_STORE_TYPE")
        .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_TYPE must be set".to_string()))?;
    let store_url = env::var("GENERIC_DATA_STORE_URL")
        .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_URL must be set".to_string()))?;

    data_store_from_config(&store_type, &store_url)
}

pub fn data_store_from_config(
    store_type: &str,
    store_url: &str,
) -> Result<Arc<dyn DataStore>, StorageError> {
    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Arc<dyn DataStore> = match store_type {
        "sqlite" if store_url.contains(":memory:") => Arc::new(SqliteDataStore::in_memory()?),
        "sqlite" => Arc::new(SqliteDataStore::connect_lazy(store_url)?),
        "postgres" => Arc::new(PostgresDataStore::connect_lazy(store_url)?),
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
            )));
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Restores an environment variable when dropped
    struct EnvVarGuard {
        key: String,
        original_value: Option<String>,
    }

    impl EnvVarGuard {
        fn set(key: &str, value: Option<&str>) -> Self {
            let original_value = env::var(key).ok();
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
            Self {
                key: key.to_string(),
                original_value,
            }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.original_value {
                    Some(value) => env::set_var(&self.key, value),
                    None => env::remove_var(&self.key),
                }
            }
        }
    }

    #[tokio::test]
    async fn test_sqlite_memory_store() {
        let store = data_store_from_config("sqlite", "sqlite::memory:").unwrap();
        assert!(store.as_sqlite().is_some());
    }

    #[tokio::test]
    async fn test_unsupported_store_type() {
        let result = data_store_from_config("mysql", "mysql://localhost");
        match result {
            Err(StorageError::Config(msg)) => assert!(msg.contains("Unsupported store type")),
            Err(e) => panic!("Expected Config error, got {e:?}"),
            Ok(_) => panic!("Expected Config error but got Ok"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_data_store_from_env() {
        let _type_guard = EnvVarGuard::set("GENERIC_DATA_STORE_TYPE", Some("sqlite"));
        let _url_guard = EnvVarGuard::set("GENERIC_DATA_STORE_URL", Some("sqlite::memory:"));

        let store = data_store_from_env().unwrap();
        assert!(store.as_sqlite().is_some());
    }

    #[test]
    #[serial]
    fn test_missing_store_type_env_var() {
        let _type_guard = EnvVarGuard::set("GENERIC_DATA_STORE_TYPE", None);
        let _url_guard = EnvVarGuard::set("GENERIC_DATA_STORE_URL", Some("sqlite::memory:"));

        match data_store_from_env() {
            Err(StorageError::Config(msg)) => {
                assert_eq!(msg, "GENERIC_DATA_STORE_TYPE must be set")
            }
            _ => panic!("Expected Config error"),
        }
    }
}
