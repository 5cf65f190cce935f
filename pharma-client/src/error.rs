//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (the session was cleared)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (duplicate invoice, existing distributor, ...)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Error reported by the API envelope
    #[error("API error: {0}")]
    Api(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local credential storage error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(app) => app,
            ClientError::Unauthorized => AppError::not_authenticated(),
            ClientError::Forbidden(msg) => AppError::permission_denied(msg),
            ClientError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Conflict(msg) => AppError::conflict(msg),
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::Storage(e) => AppError::storage(e.to_string()),
            other => AppError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_app_error() {
        let err: AppError = ClientError::Unauthorized.into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err: AppError = ClientError::Conflict("INV-9".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(err.message, "INV-9");

        let api = AppError::new(ErrorCode::DuplicateInvoice);
        let err: AppError = ClientError::Api(api).into();
        assert_eq!(err.code, ErrorCode::DuplicateInvoice);
    }
}
