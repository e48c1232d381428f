//! User storage trait.
//!
//! Defines the interface for user persistence operations.
//! Implementations are provided by storage backends (in-memory for tests,
//! PostgreSQL for deployments).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::AuthResult;

// =============================================================================
// User Type
// =============================================================================

/// A user account.
///
/// The name is the user's identity and is immutable. Names and emails stay
/// reserved while the account is soft-deleted; only the retention sweep
/// frees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account name.
    pub name: String,

    /// Unique email address.
    pub email: String,

    /// Argon2id PHC hash of the password.
    ///
    /// Filter this field out before exposing a `User` through the API.
    pub password_hash: String,

    /// Whether the user may perform admin-gated operations.
    #[serde(default)]
    pub is_admin: bool,

    /// Soft-delete flag; deleted users cannot authenticate and are hidden
    /// from default lookups.
    #[serde(default)]
    pub is_deleted: bool,

    /// When the account was soft-deleted, if it is.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Builds a fresh active account.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_admin: false,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The enumerated set of mutable user fields.
///
/// Updates go through this type rather than a free-form map, so nothing
/// outside this list can be mutated by a patch request. The name is
/// deliberately absent: it is the account's identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    pub email: Option<String>,
}

impl UserUpdate {
    /// Returns `true` when the patch carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
    }
}

// =============================================================================
// Storage Trait
// =============================================================================

/// Storage trait for user accounts.
///
/// Lookup methods take an `include_deleted` flag: the default (`false`)
/// hides soft-deleted rows, which is what authentication paths want;
/// duplicate checks and restore pass `true` so reserved names stay
/// reserved.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Persists a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the name or email collides or the
    /// backend fails.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Finds a user by name.
    async fn find_by_name(&self, name: &str, include_deleted: bool)
    -> AuthResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(
        &self,
        email: &str,
        include_deleted: bool,
    ) -> AuthResult<Option<User>>;

    /// Lists active (non-deleted) users.
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Lists soft-deleted users (admin view).
    async fn list_deleted(&self) -> AuthResult<Vec<User>>;

    /// Applies the enumerated field updates and returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the user is missing or the backend
    /// fails.
    async fn update_fields(&self, name: &str, update: &UserUpdate) -> AuthResult<User>;

    /// Replaces the stored password hash.
    async fn update_password(&self, name: &str, password_hash: &str) -> AuthResult<()>;

    /// Sets or clears the soft-delete flag, stamping `deleted_at`.
    async fn set_deleted(
        &self,
        name: &str,
        deleted: bool,
        deleted_at: Option<OffsetDateTime>,
    ) -> AuthResult<()>;

    /// Hard-deletes users soft-deleted before `cutoff`. Returns the count.
    async fn delete_older_than(&self, cutoff: OffsetDateTime) -> AuthResult<u64>;
}
