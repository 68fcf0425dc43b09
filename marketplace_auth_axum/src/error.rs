use http::StatusCode;
use marketplace_auth::{CoordinationError, FailureKind};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Details stay in the server log. The browser only sees the status.
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e.kind() {
                FailureKind::Correlation => StatusCode::BAD_REQUEST,
                FailureKind::Provider => StatusCode::BAD_GATEWAY,
                FailureKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!("Request failed with {}: {}", status, e);
            let reason = status.canonical_reason().unwrap_or("Error").to_string();
            (status, reason)
        })
    }
}
