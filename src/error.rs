//! Error types for jsonkv
//!
//! Provides a unified error type for all operations, plus a coarse
//! [`ErrorKind`] that callers can match on without caring about the detail.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for jsonkv operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Document Errors
    // -------------------------------------------------------------------------
    #[error("{0} does not exist")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("invalid document name: {0:?}")]
    InvalidName(String),

    // -------------------------------------------------------------------------
    // Content Errors
    // -------------------------------------------------------------------------
    #[error("{name} is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} does not hold a JSON object")]
    NotAnObject(String),

    #[error("{key} invalid key on {name}")]
    KeyNotFound { key: String, name: String },

    // -------------------------------------------------------------------------
    // Merge Errors
    // -------------------------------------------------------------------------
    #[error("merge aborted at {name}: {source}")]
    Aggregation {
        name: String,
        #[source]
        source: Box<StoreError>,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    ParseError,
    KeyNotFound,
    AggregationError,
    InvalidInput,
    Io,
}

impl StoreError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Io(_) => ErrorKind::Io,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StoreError::InvalidName(_) | StoreError::Config(_) => ErrorKind::InvalidInput,
            StoreError::Parse { .. } | StoreError::NotAnObject(_) => ErrorKind::ParseError,
            StoreError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            StoreError::Aggregation { .. } => ErrorKind::AggregationError,
        }
    }
}
