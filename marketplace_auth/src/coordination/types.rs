use std::sync::Arc;

use crate::oauth2::{OAuth2Params, OriginMarker};
use crate::storage::{DataStore, data_store_from_env};

use super::errors::CoordinationError;

/// Everything a request handler needs: provider parameters and the store
/// for marketplace records. Cheap to clone.
#[derive(Clone)]
pub struct AuthState {
    pub params: Arc<OAuth2Params>,
    pub store: Arc<dyn DataStore>,
}

impl AuthState {
    pub fn new(params: OAuth2Params, store: Arc<dyn DataStore>) -> Self {
        Self {
            params: Arc::new(params),
            store,
        }
    }

    /// Parameters and store from environment variables
    pub fn from_env() -> Result<Self, CoordinationError> {
        let params = OAuth2Params::from_env()?;
        let store = data_store_from_env()?;
        Ok(Self::new(params, store))
    }
}

/// Result of the callback flow, consumed by [`finish_callback`](super::finish_callback)
#[derive(Debug, Clone)]
pub enum CallbackOutcome {
    Success {
        token: String,
        origin: Option<OriginMarker>,
    },
    Failure(CoordinationError),
}

impl CallbackOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
