//! Password hashing and verification.
//!
//! Argon2id with an OsRng salt, stored in PHC string format. Plaintext
//! passwords are never logged or persisted; verification is constant-time
//! as provided by the hash library.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthResult;
use crate::error::AuthError;

/// Hashes a plaintext password for storage.
///
/// # Errors
///
/// Returns an error if hashing fails (rare).
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; only a malformed stored hash is an
/// error.
pub fn verify_password(password: &str, stored_hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::internal(format!("stored hash unreadable: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("pw123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw123", &hash).unwrap());
        assert!(!verify_password("pw124", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("pw123", "not-a-phc-string").is_err());
    }
}
