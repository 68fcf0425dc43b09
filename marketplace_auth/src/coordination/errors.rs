//! Error types for flow coordination

use thiserror::Error;

use crate::marketplace::MarketplaceError;
use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::storage::StorageError;

/// Errors that can occur while coordinating the login flow
#[derive(Error, Debug, Clone)]
pub enum CoordinationError {
    /// Error from OAuth2 operations
    #[error("OAuth2 error: {0}")]
    OAuth2Error(OAuth2Error),

    /// Error from marketplace synchronization
    #[error("Marketplace error: {0}")]
    MarketplaceError(MarketplaceError),

    /// Error from session cookie handling
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from the data store
    #[error("Storage error: {0}")]
    StorageError(StorageError),
}

/// Broad failure classes of the callback flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing or mismatching state, missing code
    Correlation,
    /// The provider rejected the exchange or answered with something unusable
    Provider,
    /// Network, parse or storage failure
    Unexpected,
}

impl CoordinationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::OAuth2Error(
                OAuth2Error::StateCookieMissing
                | OAuth2Error::StateQueryMissing
                | OAuth2Error::StateMismatch { .. }
                | OAuth2Error::CodeMissing
                | OAuth2Error::InvalidState(_),
            ) => FailureKind::Correlation,
            Self::OAuth2Error(
                OAuth2Error::ProviderError(_)
                | OAuth2Error::AccessTokenMissing(_)
                | OAuth2Error::TokenExchange(_),
            ) => FailureKind::Provider,
            _ => FailureKind::Unexpected,
        }
    }

    /// Log the error at the level matching its kind
    pub fn log(self) -> Self {
        match self.kind() {
            FailureKind::Correlation => tracing::warn!("Callback rejected: {}", self),
            FailureKind::Provider => tracing::error!("Provider rejected the login: {}", self),
            FailureKind::Unexpected => tracing::error!("Error processing auth: {}", self),
        }
        self
    }
}

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        Self::OAuth2Error(err)
    }
}

impl From<MarketplaceError> for CoordinationError {
    fn from(err: MarketplaceError) -> Self {
        Self::MarketplaceError(err)
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        Self::SessionError(err)
    }
}

impl From<StorageError> for CoordinationError {
    fn from(err: StorageError) -> Self {
        Self::StorageError(err)
    }
}
