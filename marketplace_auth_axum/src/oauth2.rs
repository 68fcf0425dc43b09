use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::get,
};
use axum_extra::{TypedHeader, headers};
use std::collections::HashMap;

use marketplace_auth::{
    AuthState, CoordinationError, STATE_COOKIE_NAME, finish_callback, handle_callback,
    prepare_setup,
};

use super::error::IntoResponseError;

pub(super) fn router() -> Router<AuthState> {
    Router::new()
        .route("/setup", get(setup).post(setup))
        .route("/callback", get(callback).post(callback))
}

async fn setup(
    State(state): State<AuthState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<(HeaderMap, Redirect), (StatusCode, String)> {
    let (auth_url, headers) = prepare_setup(&state.params, query.get("from").map(String::as_str))
        .map_err(CoordinationError::from)
        .into_response_error()?;

    Ok((headers, Redirect::to(&auth_url)))
}

/// Always redirects. Failures only show up in the server log.
async fn callback(
    State(state): State<AuthState>,
    Query(query): Query<HashMap<String, String>>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> (HeaderMap, Redirect) {
    let state_cookie = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(STATE_COOKIE_NAME));

    let outcome = handle_callback(
        &state.params,
        state.store.as_ref(),
        state_cookie,
        query.get("state").map(String::as_str),
        query.get("code").map(String::as_str),
    )
    .await;

    let (headers, location) = finish_callback(&state.params, &outcome);
    (headers, Redirect::to(&location))
}
