use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Marketplace records table name
pub(super) static DB_TABLE_MARKETPLACE: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_MARKETPLACE")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "marketplace"))
});
