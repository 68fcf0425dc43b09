use crate::utils::UtilError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("state cookie is missing")]
    StateCookieMissing,

    #[error("state query parameter is missing")]
    StateQueryMissing,

    #[error("state mismatch: {cookie} !== {query}")]
    StateMismatch { cookie: String, query: String },

    #[error("code is missing")]
    CodeMissing,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The token endpoint answered with an `error` field. Holds the raw body.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The token endpoint answered without an `error` field and without an
    /// access token. Holds the raw body.
    #[error("Access token missing in response: {0}")]
    AccessTokenMissing(String),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
