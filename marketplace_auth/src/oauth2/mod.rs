mod config;
mod errors;
mod main;
mod types;

pub use config::{OAuth2Params, STATE_COOKIE_NAME};
pub use errors::OAuth2Error;
pub use main::{exchange_code_for_token, expire_state_cookie, prepare_setup, validate_state};
pub use types::{OriginMarker, StateToken};
