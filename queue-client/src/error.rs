//! Client error types

use queue_core::error::ErrorCategory;
use queue_core::{AppError, ErrorCode, SnapshotError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
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

    /// Structured error reported by the backend or by local validation
    #[error("{0}")]
    Api(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend returned an inconsistent snapshot
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl ClientError {
    /// Numeric code for operator-facing display
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Api(err) => err.code,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Snapshot(_) => ErrorCode::SnapshotMalformed,
        }
    }

    /// Network and server-side failures that may go away on the next attempt
    pub fn is_transient(&self) -> bool {
        self.code().category() == ErrorCategory::System
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api(err)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert_eq!(
            ClientError::Snapshot(SnapshotError::DuplicateTicket(1)).code(),
            ErrorCode::SnapshotMalformed
        );
        let api: ClientError = AppError::new(ErrorCode::CannotDeleteAdmin).into();
        assert_eq!(api.code(), ErrorCode::CannotDeleteAdmin);
        assert!(!api.is_transient());
        assert!(ClientError::Internal("502".into()).is_transient());
        let bad: ClientError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert_eq!(bad.code(), ErrorCode::InvalidFormat);
    }
}
