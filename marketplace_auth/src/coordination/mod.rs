mod callback;
mod errors;
mod finish;
mod types;

pub use callback::handle_callback;
pub use errors::{CoordinationError, FailureKind};
pub use finish::finish_callback;
pub use types::{AuthState, CallbackOutcome};
