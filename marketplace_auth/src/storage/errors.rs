use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema validation failed: {0}")]
    Schema(String),

    #[error("Unsupported database type")]
    UnsupportedStore,
}
