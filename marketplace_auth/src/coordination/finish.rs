use http::HeaderMap;

use crate::oauth2::{OAuth2Params, OriginMarker, expire_state_cookie};
use crate::session::set_token_cookie;

use super::types::CallbackOutcome;

/// Builds the redirect for a finished callback.
///
/// The state cookie is removed whatever the outcome. Success sets the token
/// cookie and picks the landing page from the origin marker. Failure
/// redirects to the default landing page without a token. Returns the
/// response headers and the redirect location.
pub fn finish_callback(params: &OAuth2Params, outcome: &CallbackOutcome) -> (HeaderMap, String) {
    let mut headers = HeaderMap::new();
    if let Err(e) = expire_state_cookie(&mut headers, params) {
        tracing::error!("Error processing auth: {}", e);
    }

    let CallbackOutcome::Success { token, origin } = outcome else {
        return (headers, params.landing_url());
    };

    // Leaves `headers` untouched on error
    if let Err(e) = set_token_cookie(&mut headers, params, token) {
        tracing::error!("Error processing auth: {}", e);
        return (headers, params.landing_url());
    }

    let location = match origin {
        Some(OriginMarker::App) => params.app_landing_url(),
        None => params.landing_url(),
    };
    (headers, location)
}
