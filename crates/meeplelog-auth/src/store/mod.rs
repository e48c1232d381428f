//! Key-value session store contract.
//!
//! The store holds three kinds of entries, all with TTLs so nothing needs
//! an explicit cleanup pass:
//!
//! - `refresh:<name>` — the single live refresh token for a user; a new
//!   login overwrites it (last write wins, by design)
//! - `blacklist:<token>` — a revoked access token, expiring when the token
//!   itself would have
//! - `recovery:used:<token>` — a consumed recovery token, expiring with it
//!
//! A `set` must be visible to an immediately following `get`; no
//! multi-key atomicity is required, as no flow touches more than two
//! independent keys.

mod memory;
mod redis;

pub use memory::MemorySessionStore;
pub use redis::RedisSessionStore;

use async_trait::async_trait;

use crate::AuthResult;

/// Store key for a user's live refresh token.
#[must_use]
pub fn refresh_key(name: &str) -> String {
    format!("refresh:{name}")
}

/// Store key marking an access token as revoked.
#[must_use]
pub fn blacklist_key(token: &str) -> String {
    format!("blacklist:{token}")
}

/// Store key marking a recovery token as consumed.
#[must_use]
pub fn recovery_used_key(token: &str) -> String {
    format!("recovery:used:{token}")
}

/// Fast key-value store used for session state and the revocation
/// denylist.
///
/// Failures are infrastructure faults (`AuthError::Store`); they must
/// never be reported as credential errors.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes `value` under `key`, expiring after `ttl_seconds`.
    /// Overwrites any existing value and its TTL.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> AuthResult<()>;

    /// Reads the value under `key`, `None` if absent or expired.
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> AuthResult<()>;
}
