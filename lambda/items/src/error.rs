use std::error::Error as StdError;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Errors raised by an [`ItemStore`](crate::store::ItemStore) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("Unsupported attribute type for {0}")]
    UnsupportedAttribute(String),
    #[error("Invalid number attribute {name}: {value}")]
    InvalidNumber { name: String, value: String },
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
}

/// Errors raised while serving a single request. All of them end up as a 500.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to build response: {0}")]
    Response(#[from] lambda_http::http::Error),
}

/// Map an SDK error from any table operation to a `StoreError`.
///
/// Prefers the service's error code and message; falls back to the full
/// error chain for transport and construction failures.
pub fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: Debug + 'static,
{
    let message = match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => DisplayErrorContext(&err).to_string(),
    };
    StoreError::Request { operation, message }
}
