//! Error types for Projman Core

use thiserror::Error;

/// Result type alias using Projman Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the document store and repository
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors from storage operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LMDB/heed database errors
    #[error("Database error: {0}")]
    Database(#[from] heed::Error),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Connection string names a scheme no adapter understands
    #[error("Unsupported database URL: {0}")]
    UnsupportedUrl(String),

    /// A stored document does not have the expected shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
