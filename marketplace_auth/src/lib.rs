//! marketplace_auth - OAuth2 login and marketplace plan synchronization
//!
//! This crate drives the browser based authorization code flow against the
//! identity provider and records each account's marketplace plan in a
//! persistent table. It is framework agnostic: every operation returns plain
//! `http::HeaderMap`s and redirect locations for an integration crate to
//! turn into responses.

mod config;
mod coordination;
mod marketplace;
mod oauth2;
mod session;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::AUTH_ROUTE_PREFIX;

pub use coordination::{
    AuthState, CallbackOutcome, CoordinationError, FailureKind, finish_callback, handle_callback,
};

pub use marketplace::{
    MarketplaceAccount, MarketplaceError, MarketplacePlan, MarketplaceRecord, MarketplaceStore,
    PlanData, sync_marketplace_purchases,
};

pub use oauth2::{
    OAuth2Error, OAuth2Params, OriginMarker, STATE_COOKIE_NAME, StateToken,
    exchange_code_for_token, expire_state_cookie, prepare_setup, validate_state,
};

pub use session::{
    SessionError, TOKEN_COOKIE_NAME, is_authenticated, prepare_signout, set_token_cookie,
};

pub use storage::{
    DB_TABLE_PREFIX, DataStore, PostgresDataStore, SqliteDataStore, StorageError,
    data_store_from_config, data_store_from_env,
};

pub use utils::{UtilError, get_cookie, header_set_cookie};

/// Initialize the persistent side of the crate
///
/// Creates the marketplace table if it is missing and validates its schema.
pub async fn init(store: &dyn DataStore) -> Result<(), CoordinationError> {
    MarketplaceStore::init(store).await?;
    Ok(())
}
