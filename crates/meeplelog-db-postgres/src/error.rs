//! Error mapping for the PostgreSQL backends.

use sqlx_core::error::Error as SqlxError;

use meeplelog_auth::AuthError;
use meeplelog_storage::StorageError;

/// PostgreSQL error code for unique constraint violation (23505).
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Checks if a sqlx error has a specific PostgreSQL error code.
pub fn has_pg_error_code(err: &SqlxError, code: &str) -> bool {
    if let SqlxError::Database(db_err) = err {
        db_err.code().as_deref() == Some(code)
    } else {
        false
    }
}

/// Checks if a sqlx error is a unique constraint violation (23505).
pub fn is_unique_violation(err: &SqlxError) -> bool {
    has_pg_error_code(err, PG_UNIQUE_VIOLATION)
}

/// Maps a sqlx error to a resource-layer storage error, turning unique
/// violations into `AlreadyExists` for the given subject.
pub fn to_storage_error(err: SqlxError, what: &str) -> StorageError {
    if is_unique_violation(&err) {
        StorageError::already_exists(what)
    } else {
        StorageError::backend(err.to_string())
    }
}

/// Maps a sqlx error to the auth layer's storage variant.
pub fn to_auth_error(err: SqlxError) -> AuthError {
    AuthError::storage(err.to_string())
}
