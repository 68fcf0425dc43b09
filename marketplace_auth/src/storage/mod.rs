mod data_store;
mod errors;
mod schema_validation;

pub use data_store::{
    DB_TABLE_PREFIX, DataStore, PostgresDataStore, SqliteDataStore, data_store_from_config,
    data_store_from_env,
};
pub use errors::StorageError;

pub(crate) use schema_validation::{
    validate_postgres_table_schema, validate_sqlite_table_schema, validate_table_name,
};
