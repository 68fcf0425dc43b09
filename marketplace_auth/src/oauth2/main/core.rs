use chrono::{DateTime, Duration, Utc};
use http::header::HeaderMap;
use url::Url;

use crate::oauth2::config::{OAuth2Params, STATE_COOKIE_NAME};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{OriginMarker, StateToken};
use crate::utils::header_set_cookie;

/// Starts the flow.
///
/// Mints a fresh state token, tagged with the app marker when `from` is
/// `"app"`, and returns the provider authorization URL together with the
/// headers that store the state in the `state` cookie.
pub fn prepare_setup(
    params: &OAuth2Params,
    from: Option<&str>,
) -> Result<(String, HeaderMap), OAuth2Error> {
    let state = StateToken::generate(OriginMarker::from_query(from)).to_string();

    let auth_url = Url::parse_with_params(
        &params.auth_url,
        &[
            ("client_id", params.client_id.as_str()),
            ("redirect_uri", params.redirect_uri.as_str()),
            ("state", state.as_str()),
        ],
    )
    .map_err(|e| OAuth2Error::Config(format!("Invalid authorization URL: {e}")))?;

    tracing::debug!("Auth URL: {}", auth_url);

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        STATE_COOKIE_NAME,
        &state,
        Utc::now() + Duration::seconds(params.state_cookie_max_age),
        params.state_cookie_max_age,
        params.cookie_secure,
    )?;

    Ok((auth_url.to_string(), headers))
}

/// Appends a `Set-Cookie` that removes the state cookie.
///
/// A state is good for one callback only.
pub fn expire_state_cookie(
    headers: &mut HeaderMap,
    params: &OAuth2Params,
) -> Result<(), OAuth2Error> {
    header_set_cookie(
        headers,
        STATE_COOKIE_NAME,
        "",
        DateTime::<Utc>::UNIX_EPOCH,
        0,
        params.cookie_secure,
    )?;
    Ok(())
}
