mod core;
mod exchange;
mod state;

pub use core::{expire_state_cookie, prepare_setup};
pub use exchange::exchange_code_for_token;
pub use state::validate_state;
