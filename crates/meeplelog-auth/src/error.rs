//! Authentication error types.
//!
//! Every failure path in the auth subsystem surfaces as one of these
//! variants; nothing is swallowed. The boundary layer maps them to HTTP
//! statuses in `middleware::error`.

use thiserror::Error;

/// Message used wherever distinguishing failure causes would leak whether
/// an account exists (login, refresh mismatch, recovery confirm).
pub const UNIFORM_CREDENTIALS_DETAIL: &str = "Could not validate credentials";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad username/password, mismatched refresh token, or a subject that
    /// no longer resolves to an active user. Carries the uniform message
    /// so callers cannot probe for account existence.
    #[error("{message}")]
    Credentials {
        /// Uniform user-facing detail.
        message: String,
    },

    /// The Authorization header is missing or does not use the Bearer
    /// scheme. A request-shape problem, distinct from a bad token.
    #[error("Missing credentials: {message}")]
    MissingCredentials {
        /// Description of what was malformed.
        message: String,
    },

    /// The token signature does not verify or the payload is malformed.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The token's embedded expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// The token has been explicitly revoked via logout.
    #[error("Token revoked")]
    TokenRevoked,

    /// The authenticated user lacks the required role.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of the missing permission.
        message: String,
    },

    /// No user matches a recovery request. Account existence is not hidden
    /// on these paths.
    #[error("User [{name}] not found")]
    UserNotFound {
        /// The requested user name.
        name: String,
    },

    /// The session store failed. Infrastructure fault, never reported as a
    /// credentials problem.
    #[error("Session store error: {message}")]
    Store {
        /// Description of the store failure.
        message: String,
    },

    /// User persistence failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    /// An unexpected internal error occurred (e.g. hashing failure).
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates the uniform `Credentials` error.
    #[must_use]
    pub fn credentials() -> Self {
        Self::Credentials {
            message: UNIFORM_CREDENTIALS_DETAIL.to_string(),
        }
    }

    /// Creates a new `MissingCredentials` error.
    #[must_use]
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::MissingCredentials {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `UserNotFound` error.
    #[must_use]
    pub fn user_not_found(name: impl Into<String>) -> Self {
        Self::UserNotFound { name: name.into() }
    }

    /// Creates a new `Store` error.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` for failures that mean "the caller is not
    /// authenticated" (401 category).
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::Credentials { .. }
                | Self::MissingCredentials { .. }
                | Self::InvalidToken { .. }
                | Self::TokenExpired
                | Self::TokenRevoked
        )
    }

    /// Returns `true` for infrastructure faults (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Store { .. } | Self::Storage { .. } | Self::Internal { .. }
        )
    }
}
