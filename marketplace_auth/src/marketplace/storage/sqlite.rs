use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::marketplace::errors::MarketplaceError;
use crate::marketplace::types::MarketplaceRecord;
use crate::storage::{validate_sqlite_table_schema, validate_table_name};

use super::config::DB_TABLE_MARKETPLACE;

/// Idempotent, so it is safe to run before every statement.
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();
    validate_table_name(table_name, MarketplaceError::Storage)?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            account_id INTEGER NOT NULL,
            account_login TEXT NOT NULL,
            account_type TEXT NOT NULL,
            plan_id INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            PRIMARY KEY (account_id, account_login)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn validate_marketplace_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), MarketplaceError> {
    let expected_columns = [
        ("account_id", "INTEGER"),
        ("account_login", "TEXT"),
        ("account_type", "TEXT"),
        ("plan_id", "INTEGER"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(
        pool,
        DB_TABLE_MARKETPLACE.as_str(),
        &expected_columns,
        MarketplaceError::Storage,
    )
    .await
}

pub(super) async fn upsert_record_sqlite(
    pool: &Pool<Sqlite>,
    record: MarketplaceRecord,
) -> Result<MarketplaceRecord, MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();

    create_tables_sqlite(pool).await?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

    // Insert or merge: created_at is only written on insert
    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (account_id, account_login, account_type, plan_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (account_id, account_login) DO UPDATE SET
            account_type = excluded.account_type,
            plan_id = excluded.plan_id,
            updated_at = excluded.updated_at
        "#
    ))
    .bind(record.account_id)
    .bind(&record.account_login)
    .bind(&record.account_type)
    .bind(record.plan_id)
    .bind(record.created_at)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

    let stored = sqlx::query_as::<_, MarketplaceRecord>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE account_id = ? AND account_login = ?
        "#
    ))
    .bind(record.account_id)
    .bind(&record.account_login)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

    tx.commit()
        .await
        .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

    Ok(stored)
}

pub(super) async fn get_record_sqlite(
    pool: &Pool<Sqlite>,
    account_id: i64,
    account_login: &str,
) -> Result<Option<MarketplaceRecord>, MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();

    create_tables_sqlite(pool).await?;

    sqlx::query_as::<_, MarketplaceRecord>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE account_id = ? AND account_login = ?
        "#
    ))
    .bind(account_id)
    .bind(account_login)
    .fetch_optional(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))
}

pub(super) async fn list_records_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<Vec<MarketplaceRecord>, MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();

    create_tables_sqlite(pool).await?;

    sqlx::query_as::<_, MarketplaceRecord>(&format!(
        "SELECT * FROM {table_name} ORDER BY account_id, account_login"
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))
}
