use chrono::{DateTime, Duration, Utc};
use http::header::HeaderMap;

use crate::oauth2::OAuth2Params;
use crate::utils::header_set_cookie;

use super::errors::SessionError;

/// Name of the cookie carrying the provider access token
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Overwrites the token cookie on signout
const SIGNOUT_SENTINEL: &str = "deleted";

/// Reports whether a token cookie is present.
///
/// Only presence is checked. The token is never verified against the
/// provider after it was issued.
pub fn is_authenticated(token_cookie: Option<&str>) -> bool {
    token_cookie.is_some_and(|token| !token.is_empty())
}

pub fn set_token_cookie(
    headers: &mut HeaderMap,
    params: &OAuth2Params,
    token: &str,
) -> Result<(), SessionError> {
    if token.is_empty() {
        return Err(SessionError::Cookie("Refusing to set an empty token".to_string()));
    }
    header_set_cookie(
        headers,
        TOKEN_COOKIE_NAME,
        token,
        Utc::now() + Duration::seconds(params.token_cookie_max_age),
        params.token_cookie_max_age,
        params.cookie_secure,
    )?;
    Ok(())
}

/// Clears the token cookie and sends the browser back to the app.
///
/// Returns the redirect location and the headers expiring the cookie.
pub fn prepare_signout(params: &OAuth2Params) -> Result<(String, HeaderMap), SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        TOKEN_COOKIE_NAME,
        SIGNOUT_SENTINEL,
        DateTime::<Utc>::UNIX_EPOCH,
        0,
        params.cookie_secure,
    )?;

    Ok((params.app_landing_url(), headers))
}
