//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror`, one enum per
//! layer. The HTTP-facing error lives in [`crate::server::ApiError`].

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors raised by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite rejected a statement or could not open the database
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blocking task running a store call panicked or was cancelled
    #[error("Store task failed: {0}")]
    TaskJoin(String),

    /// A stored document is not a JSON object, or does not decode as a contact
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Collection names become table names and are restricted accordingly
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
}

/// Errors from the contact repository and service.
#[derive(Error, Debug)]
pub enum ContactError {
    /// No contact matched
    #[error("Not Found")]
    NotFound,

    /// The submitted payload or value failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The property name of a single-property update is unknown or protected
    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    /// The store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors that can occur when calling the contact API over HTTP.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API answered 400, with one or more messages
    #[error("Bad request: {}", .0.join("; "))]
    BadRequest(Vec<String>),

    /// API answered 404
    #[error("Not Found")]
    NotFound,

    /// API returned any other error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// The request was rejected before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
