//! Authentication and session subsystem for meeplelog.
//!
//! This crate owns the only genuinely stateful part of the system's
//! security model:
//!
//! - a signed token codec (HS256 over `{sub, exp}` claims)
//! - credential verification against Argon2id password hashes
//! - token issuance and refresh with an at-most-one-refresh-token-per-user
//!   invariant enforced through the session store
//! - revocation via a denylist that expires with the token it blocks
//! - per-request current-user resolution (the gate in front of every
//!   protected endpoint)
//! - the soft-delete/restore and password-reset recovery flows built from
//!   short-lived single-use tokens
//!
//! Collaborators (user persistence, the key-value session store, mail
//! delivery) enter through traits; nothing here reaches for ambient
//! globals.

pub mod config;
pub mod error;
pub mod middleware;
pub mod password;
pub mod recovery;
pub mod storage;
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AuthConfig;
pub use error::AuthError;
pub use middleware::{AdminUser, AuthState, BearerToken, CurrentUser};
pub use recovery::RecoveryService;
pub use storage::user::{User, UserStorage, UserUpdate};
pub use store::{MemorySessionStore, RedisSessionStore, SessionStore};
pub use token::codec::{Claims, TokenCodec};
pub use token::service::{TokenPair, TokenService};

/// Result type alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;
