//! Error types for the store
//!
//! `StoreError` is the closed set of failure kinds raised by the entry store
//! and the service. `ServiceError` wraps one with the operation and key that
//! produced it, keeping the kind available for programmatic matching.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failure kinds shared by the entry store and the service layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreError {
    /// Key argument missing
    #[error("key is empty")]
    EmptyKey,

    /// Value argument missing
    #[error("value is empty")]
    EmptyValue,

    /// Nothing to write, or nothing left to pop
    #[error("entry is empty")]
    EmptyEntry,

    /// Key absent from the store
    #[error("entry not found")]
    NotFound,

    /// Key present but past its expiry
    #[error("entry has expired")]
    ExpiredEntry,

    /// Stored kind does not match the operation
    #[error("wrong entry type")]
    WrongType,
}

impl StoreError {
    /// Whether this failure was caused by caller input or data state.
    ///
    /// Every current kind qualifies; an adapter maps these to a client error
    /// and anything else to an internal fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyKey
                | StoreError::EmptyValue
                | StoreError::EmptyEntry
                | StoreError::NotFound
                | StoreError::ExpiredEntry
                | StoreError::WrongType
        )
    }
}

// == Operation ==
/// Service operations, used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SetString,
    GetString,
    DeleteString,
    LPush,
    RPop,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::SetString => "SetString",
            Operation::GetString => "GetString",
            Operation::DeleteString => "DeleteString",
            Operation::LPush => "LPush",
            Operation::RPop => "RPop",
        };
        f.write_str(name)
    }
}

// == Service Error ==
/// A store failure annotated with the operation and key that hit it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{op} {key:?}: {source}")]
pub struct ServiceError {
    op: Operation,
    key: String,
    #[source]
    source: StoreError,
}

impl ServiceError {
    pub fn new(op: Operation, key: impl Into<String>, source: StoreError) -> Self {
        Self {
            op,
            key: key.into(),
            source,
        }
    }

    /// The underlying failure kind.
    pub fn kind(&self) -> StoreError {
        self.source
    }

    pub fn operation(&self) -> Operation {
        self.op
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_client_error(&self) -> bool {
        self.source.is_client_error()
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            StoreError::NotFound | StoreError::ExpiredEntry => StatusCode::NOT_FOUND,
            _ if self.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(status.as_u16(), self.to_string()));

        (status, body).into_response()
    }
}

// == Config Error ==
/// Failures while loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be strictly positive")]
    NotPositive(&'static str),

    #[error("{0} is required")]
    Missing(&'static str),
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Convenience Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::new(Operation::GetString, "foo", StoreError::NotFound);
        assert_eq!(err.to_string(), "GetString \"foo\": entry not found");
    }

    #[test]
    fn test_service_error_preserves_kind() {
        let err = ServiceError::new(Operation::LPush, "list", StoreError::WrongType);
        assert_eq!(err.kind(), StoreError::WrongType);
        assert_eq!(err.operation(), Operation::LPush);
        assert_eq!(err.key(), "list");

        let source = err.source().unwrap().downcast_ref::<StoreError>();
        assert_eq!(source, Some(&StoreError::WrongType));
    }

    #[test]
    fn test_all_kinds_are_client_errors() {
        for kind in [
            StoreError::EmptyKey,
            StoreError::EmptyValue,
            StoreError::EmptyEntry,
            StoreError::NotFound,
            StoreError::ExpiredEntry,
            StoreError::WrongType,
        ] {
            assert!(kind.is_client_error(), "{kind:?} should be a client error");
        }
    }

    #[test]
    fn test_status_mapping() {
        let not_found = ServiceError::new(Operation::GetString, "k", StoreError::NotFound);
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let expired = ServiceError::new(Operation::GetString, "k", StoreError::ExpiredEntry);
        assert_eq!(expired.into_response().status(), StatusCode::NOT_FOUND);

        let wrong = ServiceError::new(Operation::RPop, "k", StoreError::WrongType);
        assert_eq!(wrong.into_response().status(), StatusCode::BAD_REQUEST);

        let empty = ServiceError::new(Operation::SetString, "", StoreError::EmptyKey);
        assert_eq!(empty.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
