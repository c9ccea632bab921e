//! Error handling for the Folio client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Folio client.
#[derive(Error, Debug)]
pub enum Error {
    /// A required form field was missing or empty; raised before any
    /// network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Table (database) errors
    #[error("Table error: {0}")]
    Table(#[from] folio_table::TableError),

    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] folio_auth::AuthError),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] folio_storage::StorageError),

    /// Hosted function errors
    #[error("Function error: {0}")]
    Function(#[from] folio_functions::FunctionsError),

    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Errors from the pure transform tools (bad input, unsupported format)
    #[error("Tool error: {0}")]
    Tool(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new tool error
    pub fn tool<T: fmt::Display>(msg: T) -> Self {
        Error::Tool(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
