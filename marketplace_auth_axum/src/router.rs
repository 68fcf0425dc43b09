//! Combined router for the login endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use marketplace_auth::AuthState;

/// Create the router for all login endpoints
///
/// The endpoints will be available at:
/// - {AUTH_ROUTE_PREFIX}/setup
/// - {AUTH_ROUTE_PREFIX}/callback
/// - {AUTH_ROUTE_PREFIX}/isauthenticated
/// - {AUTH_ROUTE_PREFIX}/signout
pub fn marketplace_auth_router(state: AuthState) -> Router {
    marketplace_auth_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`marketplace_auth_router`] without the HTTP tracing middleware
pub fn marketplace_auth_router_no_trace(state: AuthState) -> Router {
    let webhost = state.params.webhost.clone();
    Router::new()
        .merge(super::oauth2::router())
        .merge(super::session::router(&webhost))
        .with_state(state)
}
