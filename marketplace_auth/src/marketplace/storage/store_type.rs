use crate::marketplace::errors::MarketplaceError;
use crate::marketplace::types::MarketplaceRecord;
use crate::storage::{DataStore, StorageError};

use super::postgres::*;
use super::sqlite::*;

pub struct MarketplaceStore;

impl MarketplaceStore {
    /// Create the marketplace table if needed and check its schema
    pub async fn init(store: &dyn DataStore) -> Result<(), MarketplaceError> {
        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_marketplace_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_marketplace_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(StorageError::UnsupportedStore.into()),
        }
    }

    /// Insert the record, or merge `account_type` and `plan_id` into the
    /// existing row with the same (`account_id`, `account_login`).
    pub async fn upsert_record(
        store: &dyn DataStore,
        record: MarketplaceRecord,
    ) -> Result<MarketplaceRecord, MarketplaceError> {
        if record.account_login.is_empty() {
            return Err(MarketplaceError::Storage(
                "account_login must be set before upserting a marketplace record".to_string(),
            ));
        }

        if let Some(pool) = store.as_sqlite() {
            upsert_record_sqlite(pool, record).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_record_postgres(pool, record).await
        } else {
            Err(StorageError::UnsupportedStore.into())
        }
    }

    pub async fn get_record(
        store: &dyn DataStore,
        account_id: i64,
        account_login: &str,
    ) -> Result<Option<MarketplaceRecord>, MarketplaceError> {
        if let Some(pool) = store.as_sqlite() {
            get_record_sqlite(pool, account_id, account_login).await
        } else if let Some(pool) = store.as_postgres() {
            get_record_postgres(pool, account_id, account_login).await
        } else {
            Err(StorageError::UnsupportedStore.into())
        }
    }

    pub async fn list_records(
        store: &dyn DataStore,
    ) -> Result<Vec<MarketplaceRecord>, MarketplaceError> {
        if let Some(pool) = store.as_sqlite() {
            list_records_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            list_records_postgres(pool).await
        } else {
            Err(StorageError::UnsupportedStore.into())
        }
    }
}
