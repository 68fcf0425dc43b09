mod errors;
mod main;

pub use errors::SessionError;
pub use main::{TOKEN_COOKIE_NAME, is_authenticated, prepare_signout, set_token_cookie};
