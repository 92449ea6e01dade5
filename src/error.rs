//! Error types for the parameter cache
//!
//! Every remote failure is wrapped with the key and the operation that was
//! attempted. Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::client::StoreError;
use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the parameter cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is not a valid parameter name
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Invalid request data
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Full fetch of the parameter failed (including the refresh after a write)
    #[error("failed to retrieve key {key}")]
    Retrieve {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Metadata-only version check failed
    #[error("failed to check version of key {key}")]
    VersionCheck {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Writing the parameter to the store failed
    #[error("failed to store key {key}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl CacheError {
    /// Returns the underlying store error, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            CacheError::InvalidKey(_) | CacheError::InvalidRequest(_) => None,
            CacheError::Retrieve { source, .. }
            | CacheError::VersionCheck { source, .. }
            | CacheError::Store { source, .. } => Some(source),
        }
    }

    /// Returns true if the store reported the parameter as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.store_error(), Some(StoreError::NotFound(_)))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match (&self, self.store_error()) {
            (CacheError::InvalidKey(_) | CacheError::InvalidRequest(_), _) => {
                StatusCode::BAD_REQUEST
            }
            (_, Some(StoreError::NotFound(_))) => StatusCode::NOT_FOUND,
            (_, Some(StoreError::AccessDenied(_))) => StatusCode::FORBIDDEN,
            (_, Some(StoreError::AlreadyExists(_))) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_GATEWAY,
        };

        let message = match self.store_error() {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the parameter cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_key_and_operation() {
        let err = CacheError::Retrieve {
            key: "app/db".to_string(),
            source: StoreError::Unavailable("down".to_string()),
        };
        assert_eq!(err.to_string(), "failed to retrieve key app/db");

        let err = CacheError::Store {
            key: "app/db".to_string(),
            source: StoreError::Unavailable("down".to_string()),
        };
        assert_eq!(err.to_string(), "failed to store key app/db");
    }

    #[test]
    fn test_is_not_found() {
        let err = CacheError::Retrieve {
            key: "k".to_string(),
            source: StoreError::NotFound("k".to_string()),
        };
        assert!(err.is_not_found());
        assert!(!CacheError::InvalidKey("".to_string()).is_not_found());
    }

    #[test]
    fn test_status_mapping() {
        let not_found = CacheError::VersionCheck {
            key: "k".to_string(),
            source: StoreError::NotFound("k".to_string()),
        };
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = CacheError::InvalidKey("bad key".to_string());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let denied = CacheError::Retrieve {
            key: "k".to_string(),
            source: StoreError::AccessDenied("kms".to_string()),
        };
        assert_eq!(denied.into_response().status(), StatusCode::FORBIDDEN);

        let down = CacheError::Store {
            key: "k".to_string(),
            source: StoreError::Unavailable("down".to_string()),
        };
        assert_eq!(down.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
