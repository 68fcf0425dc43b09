//! Axum integration for marketplace-auth
//!
//! Mount [`marketplace_auth_router`] under [`AUTH_ROUTE_PREFIX`] to expose
//! `setup`, `callback`, `isauthenticated` and `signout`.

mod error;
mod oauth2;
mod router;
mod session;

#[cfg(test)]
mod test_utils;

pub use error::IntoResponseError;
pub use router::{marketplace_auth_router, marketplace_auth_router_no_trace};

// Re-export what an application needs to build the router state
pub use marketplace_auth::{AUTH_ROUTE_PREFIX, AuthState, CoordinationError, init};
