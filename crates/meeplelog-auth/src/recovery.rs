//! Account recovery: password reset, soft-delete/restore, and the
//! retention sweep.
//!
//! Reset and restore both follow the same shape: mint a short-lived
//! signed token carrying only the subject, hand it to the mail capability
//! fire-and-forget, and later accept it exactly once on the confirm
//! endpoint. Issuance is stateless — the store is only touched when a
//! token is consumed, via a `recovery:used:<token>` marker that lives as
//! long as the token itself could have.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use meeplelog_notifications::{Mailer, messages};

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password::hash_password;
use crate::storage::user::{User, UserStorage};
use crate::store::{SessionStore, recovery_used_key};
use crate::token::codec::TokenCodec;

/// Password reset, deactivate/restore, and hard-delete retention.
pub struct RecoveryService {
    codec: Arc<TokenCodec>,
    store: Arc<dyn SessionStore>,
    users: Arc<dyn UserStorage>,
    mailer: Arc<dyn Mailer>,
    config: AuthConfig,
    /// Public base URL used to build confirm links in mails.
    base_url: String,
}

impl RecoveryService {
    /// Creates a new recovery service.
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserStorage>,
        mailer: Arc<dyn Mailer>,
        config: AuthConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            store,
            users,
            mailer,
            config,
            base_url: base_url.into(),
        }
    }

    /// Mints a reset token for an active user and mails the confirm link.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no active user has that name — existence
    /// is not hidden on this path.
    pub async fn request_password_reset(&self, name: &str) -> AuthResult<()> {
        let user = self
            .users
            .find_by_name(name, false)
            .await?
            .ok_or_else(|| AuthError::user_not_found(name))?;

        let token = self
            .codec
            .create(&user.name, self.config.recovery_token_lifetime())?;

        let message = messages::password_reset(&user.email, &user.name, &token, &self.base_url);
        self.send_in_background(message);

        info!(user = %user.name, "Password reset requested");
        Ok(())
    }

    /// Consumes a reset token and stores the new password hash.
    ///
    /// # Errors
    ///
    /// Returns the uniform credentials error for an already-used token or
    /// an unresolvable subject; decode failures propagate.
    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> AuthResult<()> {
        let claims = self.check_unused(token).await?;

        let user = self
            .users
            .find_by_name(&claims.sub, false)
            .await?
            .ok_or_else(AuthError::credentials)?;

        let password_hash = hash_password(new_password)?;
        self.users
            .update_password(&user.name, &password_hash)
            .await?;

        self.consume(token, claims.remaining_seconds()).await?;
        info!(user = %user.name, "Password reset confirmed");
        Ok(())
    }

    /// Soft-deletes a user, stamping the deletion time.
    ///
    /// Callers must also revoke the session's access token (the logout
    /// composition) so deactivation takes effect immediately.
    pub async fn deactivate(&self, user: &User) -> AuthResult<()> {
        self.users
            .set_deleted(&user.name, true, Some(OffsetDateTime::now_utc()))
            .await?;

        info!(user = %user.name, "Account deactivated");
        Ok(())
    }

    /// Mints a restore token for a soft-deleted user and mails the link.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` unless a soft-deleted user has that name;
    /// an active account cannot be "restored".
    pub async fn request_restore(&self, name: &str) -> AuthResult<()> {
        let user = self
            .users
            .find_by_name(name, true)
            .await?
            .filter(|u| u.is_deleted)
            .ok_or_else(|| AuthError::user_not_found(name))?;

        let token = self
            .codec
            .create(&user.name, self.config.recovery_token_lifetime())?;

        let message = messages::account_restore(&user.email, &user.name, &token, &self.base_url);
        self.send_in_background(message);

        info!(user = %user.name, "Account restore requested");
        Ok(())
    }

    /// Consumes a restore token and clears the soft-delete mark.
    pub async fn confirm_restore(&self, token: &str) -> AuthResult<()> {
        let claims = self.check_unused(token).await?;

        let user = self
            .users
            .find_by_name(&claims.sub, true)
            .await?
            .filter(|u| u.is_deleted)
            .ok_or_else(AuthError::credentials)?;

        self.users.set_deleted(&user.name, false, None).await?;

        self.consume(token, claims.remaining_seconds()).await?;
        info!(user = %user.name, "Account restored");
        Ok(())
    }

    /// Hard-deletes accounts soft-deleted longer ago than `threshold_days`.
    ///
    /// Returns the number of accounts removed; zero is a normal no-op.
    /// Intended for the periodic retention job and admin use, not per
    /// request.
    pub async fn hard_delete_sweep(&self, threshold_days: u64) -> AuthResult<u64> {
        let cutoff = OffsetDateTime::now_utc() - Duration::days(threshold_days as i64);
        let removed = self.users.delete_older_than(cutoff).await?;

        if removed > 0 {
            info!(removed, threshold_days, "Retention sweep removed accounts");
        }
        Ok(removed)
    }

    /// Decodes a recovery token, rejecting ones already consumed.
    async fn check_unused(&self, token: &str) -> AuthResult<crate::token::codec::Claims> {
        if self.store.get(&recovery_used_key(token)).await?.is_some() {
            return Err(AuthError::credentials());
        }
        self.codec.decode(token)
    }

    /// Marks a recovery token consumed for the rest of its lifetime.
    async fn consume(&self, token: &str, remaining_seconds: f64) -> AuthResult<()> {
        if remaining_seconds > 0.0 {
            self.store
                .set_with_ttl(
                    &recovery_used_key(token),
                    "1",
                    remaining_seconds.ceil() as u64,
                )
                .await?;
        }
        Ok(())
    }

    fn send_in_background(&self, message: meeplelog_notifications::MailMessage) {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(message).await {
                warn!(error = %e, "Recovery mail delivery failed");
            }
        });
    }
}
