//! Signed token encoding and decoding.
//!
//! Tokens are compact JWTs signed with HS256 and a server-held secret,
//! carrying exactly `{sub, exp}`: the subject (user name) and a UTC Unix
//! timestamp expiry. The same codec mints access, refresh, and recovery
//! tokens; they differ only in lifetime and in how the rest of the system
//! treats them.
//!
//! Decode failures split into two caller-distinguishable kinds:
//! [`AuthError::TokenExpired`] when only the expiry has passed, and
//! [`AuthError::InvalidToken`] for everything else (bad signature,
//! malformed payload, missing subject). Both surface as authentication
//! failures at the boundary.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims carried by every meeplelog token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's name.
    pub sub: String,

    /// Expiry as a floating-point UTC Unix timestamp.
    pub exp: f64,
}

impl Claims {
    /// Seconds until expiry; non-positive once expired.
    #[must_use]
    pub fn remaining_seconds(&self) -> f64 {
        self.exp - now_timestamp()
    }
}

/// Current UTC time as a float Unix timestamp with sub-second precision.
///
/// Sub-second precision matters: two tokens minted for the same subject in
/// the same second must still differ, or re-login could not rotate the
/// stored refresh token.
fn now_timestamp() -> f64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9
}

/// Service for encoding and decoding signed tokens.
///
/// Built once from [`AuthConfig`] and shared (`Send + Sync`); holds the
/// only copy of the derived signing keys.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from the configured secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unsupported
    /// algorithm or an empty secret.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        config
            .validate()
            .map_err(|e| AuthError::internal(format!("auth configuration: {e}")))?;

        // Expiry is checked by hand below so the float timestamp keeps its
        // exact `now >= exp` semantics and the expired/invalid split stays
        // under our control.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
        })
    }

    /// Mints a token for `subject` expiring `lifetime` from now.
    ///
    /// Pure function of the clock and the secret; nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn create(&self, subject: &str, lifetime: Duration) -> AuthResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: now_timestamp() + lifetime.whole_seconds() as f64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("token encoding failed: {e}")))
    }

    /// Verifies signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenExpired` when the embedded expiry has passed and
    /// `InvalidToken` for any other verification failure.
    pub fn decode(&self, token: &str) -> AuthResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(AuthError::from)?;

        if now_timestamp() >= data.claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims)
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::invalid_token(err.to_string()),
        }
    }
}
