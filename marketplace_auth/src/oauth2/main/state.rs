use subtle::ConstantTimeEq;

use crate::oauth2::errors::OAuth2Error;

/// Checks the state echoed back by the provider against the state cookie.
///
/// Succeeds only when both values are present, non-empty and byte for byte
/// equal. Every failure is logged with both values.
pub fn validate_state(
    state_from_cookie: Option<&str>,
    state_from_query: Option<&str>,
) -> Result<(), OAuth2Error> {
    let cookie = state_from_cookie.filter(|s| !s.is_empty());
    let query = state_from_query.filter(|s| !s.is_empty());

    let Some(cookie) = cookie else {
        tracing::error!(
            "state cookie is missing: cookie={:?}, query={:?}",
            state_from_cookie,
            state_from_query
        );
        return Err(OAuth2Error::StateCookieMissing);
    };

    let Some(query) = query else {
        tracing::error!(
            "state query parameter is missing: cookie={:?}, query={:?}",
            cookie,
            state_from_query
        );
        return Err(OAuth2Error::StateQueryMissing);
    };

    if !bool::from(cookie.as_bytes().ct_eq(query.as_bytes())) {
        tracing::error!("state mismatch: {} !== {}", cookie, query);
        return Err(OAuth2Error::StateMismatch {
            cookie: cookie.to_string(),
            query: query.to_string(),
        });
    }

    Ok(())
}
