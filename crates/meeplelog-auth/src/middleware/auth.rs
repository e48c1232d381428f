//! Bearer token extractors.
//!
//! `CurrentUser` is the gate in front of every protected endpoint: it runs
//! the denylist check, decodes the token, and resolves the subject to an
//! active user on every request — no caching, so a revoked token is
//! rejected immediately.
//!
//! # Example
//!
//! ```ignore
//! async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
//!     Json(user.into())
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::user::{User, UserStorage};
use crate::store::{SessionStore, blacklist_key};
use crate::token::codec::TokenCodec;

// =============================================================================
// Auth State
// =============================================================================

/// State required by the auth extractors.
///
/// Include this in the application state and expose it via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Token codec for decode/verify.
    pub codec: Arc<TokenCodec>,

    /// Session store holding the revocation denylist.
    pub store: Arc<dyn SessionStore>,

    /// User persistence for subject resolution.
    pub users: Arc<dyn UserStorage>,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserStorage>,
    ) -> Self {
        Self {
            codec,
            store,
            users,
        }
    }
}

// =============================================================================
// Token extraction
// =============================================================================

/// Pulls the bearer token out of the Authorization header.
///
/// A missing header or a non-Bearer scheme is a request-shape failure
/// (`MissingCredentials`), distinct from a token that fails verification.
fn bearer_token(parts: &Parts) -> Result<String, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::missing_credentials("Missing Authorization header"))?
        .to_str()
        .map_err(|_| AuthError::missing_credentials("Authorization header is not valid ASCII"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::missing_credentials("Authorization scheme must be Bearer"))?;

    if token.is_empty() {
        return Err(AuthError::missing_credentials("Empty bearer token"));
    }

    Ok(token.to_string())
}

/// Resolves a bearer token to its active user.
///
/// Order matters: the denylist is consulted before the signature is even
/// checked, so a revoked token can never resolve, and the user lookup uses
/// the default non-deleted filter, so deactivation ends the session at the
/// next request.
pub async fn resolve_current_user(state: &AuthState, token: &str) -> AuthResult<User> {
    if state.store.get(&blacklist_key(token)).await?.is_some() {
        debug!("Rejected revoked token");
        return Err(AuthError::TokenRevoked);
    }

    let claims = state.codec.decode(token)?;

    state
        .users
        .find_by_name(&claims.sub, false)
        .await?
        .ok_or_else(|| {
            debug!(user = %claims.sub, "Token subject does not resolve to an active user");
            AuthError::credentials()
        })
}

// =============================================================================
// Extractors
// =============================================================================

/// Extractor yielding the raw bearer token without validating it.
///
/// Used by endpoints that consume the token itself (refresh, logout)
/// rather than the user behind it.
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts).map(BearerToken)
    }
}

/// Extractor resolving the request's bearer token to the active user.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let token = bearer_token(parts)?;
        resolve_current_user(&auth_state, &token)
            .await
            .map(CurrentUser)
    }
}

/// Extractor like [`CurrentUser`] that additionally requires the admin
/// role.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let token = bearer_token(parts)?;
        let user = resolve_current_user(&auth_state, &token).await?;

        if !user.is_admin {
            return Err(AuthError::forbidden("Administrator privileges required"));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::{Duration, OffsetDateTime};

    use crate::password::hash_password;
    use crate::store::{MemorySessionStore, refresh_key};
    use crate::test_support::{MockUserStorage, test_config};
    use crate::token::service::TokenService;

    async fn test_state() -> (AuthState, TokenService) {
        let config = test_config();
        let codec = Arc::new(TokenCodec::new(&config).unwrap());
        let store = Arc::new(MemorySessionStore::new());
        let users = Arc::new(MockUserStorage::new());

        users
            .add(User::new(
                "alice",
                "alice@example.com",
                hash_password("pw123").unwrap(),
            ))
            .await;

        let state = AuthState::new(codec.clone(), store.clone(), users.clone());
        let service = TokenService::new(codec, store, users, config);
        (state, service)
    }

    #[tokio::test]
    async fn valid_token_resolves_to_user() {
        let (state, service) = test_state().await;
        let pair = service.login("alice", "pw123").await.unwrap();

        let user = resolve_current_user(&state, &pair.access_token)
            .await
            .unwrap();
        assert_eq!(user.name, "alice");
    }

    #[tokio::test]
    async fn revoked_token_rejected_before_decode() {
        let (state, service) = test_state().await;
        let pair = service.login("alice", "pw123").await.unwrap();

        service.logout(&pair.access_token).await.unwrap();

        // decode alone would still succeed; the resolver must not.
        assert!(state.codec.decode(&pair.access_token).is_ok());
        assert!(matches!(
            resolve_current_user(&state, &pair.access_token).await,
            Err(AuthError::TokenRevoked)
        ));
    }

    #[tokio::test]
    async fn expired_token_classified_as_expired() {
        let (state, _) = test_state().await;
        let expired = state.codec.create("alice", Duration::minutes(-1)).unwrap();

        assert!(matches!(
            resolve_current_user(&state, &expired).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn deactivated_user_no_longer_resolves() {
        let (state, service) = test_state().await;
        let pair = service.login("alice", "pw123").await.unwrap();

        state
            .users
            .set_deleted("alice", true, Some(OffsetDateTime::now_utc()))
            .await
            .unwrap();

        assert!(matches!(
            resolve_current_user(&state, &pair.access_token).await,
            Err(AuthError::Credentials { .. })
        ));
    }

    #[tokio::test]
    async fn end_to_end_login_use_logout_reject() {
        let (state, service) = test_state().await;

        // login → protected call succeeds
        let pair = service.login("alice", "pw123").await.unwrap();
        assert!(
            resolve_current_user(&state, &pair.access_token)
                .await
                .is_ok()
        );

        // logout → the same token is rejected
        service.logout(&pair.access_token).await.unwrap();
        let err = resolve_current_user(&state, &pair.access_token)
            .await
            .unwrap_err();
        assert!(err.is_unauthenticated());

        // and the stored refresh token is gone too
        assert!(
            state
                .store
                .get(&refresh_key("alice"))
                .await
                .unwrap()
                .is_none()
        );
    }
}
