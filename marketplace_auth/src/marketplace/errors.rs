use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum MarketplaceError {
    #[error("Fetch marketplace purchases error: {0}")]
    Fetch(String),

    #[error("Marketplace API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Data store error: {0}")]
    DataStore(#[from] StorageError),
}
