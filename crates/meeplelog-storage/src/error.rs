//! Error types for the storage abstraction layer.

use thiserror::Error;

/// Errors produced by storage backends.
///
/// `NotFound` and `AlreadyExists` are expected outcomes the request layer
/// maps to 404/409; everything else is an infrastructure fault and must
/// surface as an opaque internal error, never as a credentials failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{what} not found")]
    NotFound { what: String },

    #[error("{what} already exists")]
    AlreadyExists { what: String },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl StorageError {
    /// Create a new NotFound error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a new AlreadyExists error
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists { what: what.into() }
    }

    /// Create a new Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a new Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx category)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::AlreadyExists { .. })
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
