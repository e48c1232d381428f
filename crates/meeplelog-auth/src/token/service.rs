//! Token issuance, refresh, and revocation.
//!
//! The session state machine lives here: Anonymous → Authenticated (login)
//! → Refreshed (any number of times) → Revoked (logout). Two store keys
//! carry all of it:
//!
//! - `refresh:<name>` holds the single live refresh token; login
//!   overwrites it, so an earlier refresh token silently stops matching
//!   and becomes unusable without ever being blacklisted.
//! - `blacklist:<token>` marks a revoked access token until its natural
//!   expiry, at which point the entry ages out of the store.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password::verify_password;
use crate::storage::user::UserStorage;
use crate::store::{SessionStore, blacklist_key, refresh_key};
use crate::token::codec::TokenCodec;

/// Successful login result.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Authenticated user name, echoed for the client.
    pub name: String,
}

/// Orchestrates credential verification, token minting, and revocation.
pub struct TokenService {
    codec: Arc<TokenCodec>,
    store: Arc<dyn SessionStore>,
    users: Arc<dyn UserStorage>,
    config: AuthConfig,
}

impl TokenService {
    /// Creates a new token service.
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserStorage>,
        config: AuthConfig,
    ) -> Self {
        Self {
            codec,
            store,
            users,
            config,
        }
    }

    /// Verifies credentials and mints an access + refresh token pair.
    ///
    /// The refresh token is persisted at `refresh:<name>` with a TTL equal
    /// to its lifetime, overwriting any previous value — concurrent logins
    /// race to last-write-wins, which is the intended at-most-one-live-
    /// refresh-token semantic.
    ///
    /// # Errors
    ///
    /// Returns the uniform `Credentials` error for both unknown user and
    /// wrong password; store and hashing faults propagate as such.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<TokenPair> {
        let Some(user) = self.users.find_by_name(username, false).await? else {
            debug!(user = %username, "Login rejected: unknown user");
            return Err(AuthError::credentials());
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(user = %username, "Login rejected: wrong password");
            return Err(AuthError::credentials());
        }

        let access_token = self
            .codec
            .create(&user.name, self.config.access_token_lifetime())?;
        let refresh_token = self
            .codec
            .create(&user.name, self.config.refresh_token_lifetime())?;

        self.store
            .set_with_ttl(
                &refresh_key(&user.name),
                &refresh_token,
                self.config.refresh_token_lifetime_minutes * 60,
            )
            .await?;

        info!(user = %user.name, "Login succeeded");
        Ok(TokenPair {
            access_token,
            refresh_token,
            name: user.name,
        })
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// The presented token must be byte-identical to the stored value for
    /// its subject; anything stale, tampered, or already rotated away is
    /// rejected. The refresh token itself is not rotated here.
    ///
    /// # Errors
    ///
    /// Propagates decode failures (`TokenExpired`/`InvalidToken`) and
    /// returns `Credentials` on a store mismatch.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<String> {
        let claims = self.codec.decode(refresh_token)?;

        let stored = self.store.get(&refresh_key(&claims.sub)).await?;
        match stored {
            Some(current) if current == refresh_token => {
                debug!(user = %claims.sub, "Refresh accepted");
                self.codec
                    .create(&claims.sub, self.config.access_token_lifetime())
            }
            _ => {
                debug!(user = %claims.sub, "Refresh rejected: token does not match stored value");
                Err(AuthError::credentials())
            }
        }
    }

    /// Revokes the presented access token and the subject's refresh token.
    ///
    /// The denylist entry's TTL equals the token's remaining lifetime, so
    /// the store entry expires no later than the token itself would have;
    /// a token already past expiry skips the write entirely.
    ///
    /// # Errors
    ///
    /// Propagates decode failures; store faults surface as `Store`.
    pub async fn logout(&self, access_token: &str) -> AuthResult<()> {
        let claims = self.codec.decode(access_token)?;

        self.store.delete(&refresh_key(&claims.sub)).await?;

        let remaining = claims.remaining_seconds();
        if remaining > 0.0 {
            self.store
                .set_with_ttl(
                    &blacklist_key(access_token),
                    "revoked",
                    remaining.ceil() as u64,
                )
                .await?;
        }

        info!(user = %claims.sub, "Logout: session revoked");
        Ok(())
    }
}
