use crate::marketplace::sync_marketplace_purchases;
use crate::oauth2::{OAuth2Error, OAuth2Params, StateToken, exchange_code_for_token, validate_state};
use crate::storage::DataStore;

use super::errors::CoordinationError;
use super::types::CallbackOutcome;

/// Completes the authorization code flow.
///
/// Never fails: every error is logged and folded into
/// [`CallbackOutcome::Failure`].
pub async fn handle_callback(
    params: &OAuth2Params,
    store: &dyn DataStore,
    state_cookie: Option<&str>,
    state_query: Option<&str>,
    code: Option<&str>,
) -> CallbackOutcome {
    match process_callback(params, store, state_cookie, state_query, code).await {
        Ok((token, state)) => CallbackOutcome::Success {
            token,
            origin: state.origin(),
        },
        Err(e) => CallbackOutcome::Failure(e.log()),
    }
}

async fn process_callback(
    params: &OAuth2Params,
    store: &dyn DataStore,
    state_cookie: Option<&str>,
    state_query: Option<&str>,
    code: Option<&str>,
) -> Result<(String, StateToken), CoordinationError> {
    validate_state(state_cookie, state_query)?;
    let raw_state = state_query.ok_or(OAuth2Error::StateQueryMissing)?;
    let state: StateToken = raw_state.parse()?;

    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(OAuth2Error::CodeMissing)?;

    let token = exchange_code_for_token(params, code, raw_state).await?;

    let count = sync_marketplace_purchases(params, store, &token).await?;
    tracing::info!("Synchronized {} marketplace record(s)", count);

    Ok((token, state))
}
