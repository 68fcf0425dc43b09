use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::marketplace::errors::MarketplaceError;
use crate::marketplace::types::MarketplaceRecord;
use crate::storage::{validate_postgres_table_schema, validate_table_name};

use super::config::DB_TABLE_MARKETPLACE;

pub(super) async fn create_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();
    validate_table_name(table_name, MarketplaceError::Storage)?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            account_id BIGINT NOT NULL,
            account_login TEXT NOT NULL,
            account_type TEXT NOT NULL,
            plan_id BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            PRIMARY KEY (account_id, account_login)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn validate_marketplace_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), MarketplaceError> {
    let expected_columns = [
        ("account_id", "bigint"),
        ("account_login", "text"),
        ("account_type", "text"),
        ("plan_id", "bigint"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(
        pool,
        DB_TABLE_MARKETPLACE.as_str(),
        &expected_columns,
        MarketplaceError::Storage,
    )
    .await
}

pub(super) async fn upsert_record_postgres(
    pool: &Pool<Postgres>,
    record: MarketplaceRecord,
) -> Result<MarketplaceRecord, MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();

    create_tables_postgres(pool).await?;

    sqlx::query_as::<_, MarketplaceRecord>(&format!(
        r#"
        INSERT INTO {table_name}
            (account_id, account_login, account_type, plan_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (account_id, account_login) DO UPDATE SET
            account_type = EXCLUDED.account_type,
            plan_id = EXCLUDED.plan_id,
            updated_at = EXCLUDED.updated_at
        RETURNING *
        "#
    ))
    .bind(record.account_id)
    .bind(&record.account_login)
    .bind(&record.account_type)
    .bind(record.plan_id)
    .bind(record.created_at)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))
}

pub(super) async fn get_record_postgres(
    pool: &Pool<Postgres>,
    account_id: i64,
    account_login: &str,
) -> Result<Option<MarketplaceRecord>, MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();

    create_tables_postgres(pool).await?;

    sqlx::query_as::<_, MarketplaceRecord>(&format!(
        "SELECT * FROM {table_name} WHERE account_id = $1 AND account_login = $2"
    ))
    .bind(account_id)
    .bind(account_login)
    .fetch_optional(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))
}

pub(super) async fn list_records_postgres(
    pool: &Pool<Postgres>,
) -> Result<Vec<MarketplaceRecord>, MarketplaceError> {
    let table_name = DB_TABLE_MARKETPLACE.as_str();

    create_tables_postgres(pool).await?;

    sqlx::query_as::<_, MarketplaceRecord>(&format!(
        "SELECT * FROM {table_name} ORDER BY account_id, account_login"
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| MarketplaceError::Storage(e.to_string()))
}
