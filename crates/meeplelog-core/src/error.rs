use thiserror::Error;

/// Core error types for meeplelog domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Not acceptable: {message}")]
    NotAcceptable { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CoreError {
    /// Create a new NotFound error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a new Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new NotAcceptable error
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::NotAcceptable {
            message: message.into(),
        }
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx category)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Conflict { .. }
                | Self::Validation { .. }
                | Self::NotAcceptable { .. }
        )
    }

    /// Check if this error is a server error (5xx category)
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
