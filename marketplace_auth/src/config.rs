//! Central configuration for the marketplace_auth crate

use std::sync::LazyLock;

const DEFAULT_ROUTE_PREFIX: &str = "/api";

/// Route prefix under which the setup, callback, isauthenticated and signout
/// endpoints are mounted.
///
/// Default: "/api"
pub static AUTH_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(route_prefix_from_env);

fn route_prefix_from_env() -> String {
    std::env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| DEFAULT_ROUTE_PREFIX.to_string())
}
