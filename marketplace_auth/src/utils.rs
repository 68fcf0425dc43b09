use chrono::{DateTime, Utc};
use headers::{Cookie, HeaderMapExt};
use http::header::{HeaderMap, SET_COOKIE};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Invalid format: {0}")]
    Format(String),
}

/// Process wide HTTP client for calls to the identity provider.
///
/// - `timeout`: 30 seconds, so a stalled provider cannot hold a request forever.
/// - `pool_idle_timeout`: 90 seconds before an idle pooled connection is dropped.
/// - `pool_max_idle_per_host`: 32 idle connections kept per host.
///
/// `reqwest::Client` is internally reference counted and safe to share between
/// concurrent requests.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default reqwest client: {}", e);
            reqwest::Client::new()
        })
});

pub(crate) fn http_client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}

/// Append a `Set-Cookie` header for `name=value`.
///
/// The cookie is host wide (`Path=/`), `HttpOnly` and `SameSite=Lax` so that it
/// survives the top level redirect coming back from the provider. A `max_age`
/// of zero or less together with an `expires_at` in the past removes the
/// cookie on the client.
pub fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    name: &str,
    value: &str,
    expires_at: DateTime<Utc>,
    max_age: i64,
    secure: bool,
) -> Result<&'a HeaderMap, UtilError> {
    if name.is_empty() || name.contains(['=', ';', ' ']) {
        return Err(UtilError::Cookie(format!("Invalid cookie name: {name:?}")));
    }
    if value.contains([';', ' ', '"']) {
        return Err(UtilError::Cookie(format!("Invalid cookie value for {name}")));
    }

    let secure = if secure { "; Secure" } else { "" };
    let cookie = format!(
        "{name}={value}; SameSite=Lax{secure}; HttpOnly; Path=/; Max-Age={max_age}; Expires={}",
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    );
    tracing::trace!("Cookie: {:#?}", cookie);

    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

/// Read a single cookie value from the request headers.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(name).map(|v| v.to_string()))
}
