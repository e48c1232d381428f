//! Redis-backed session store.

use deadpool_redis::{Pool, redis::AsyncCommands};
use async_trait::async_trait;

use super::SessionStore;
use crate::AuthResult;
use crate::error::AuthError;

/// [`SessionStore`] backed by a Redis connection pool.
///
/// TTLs are enforced server-side (`SET ... EX`), so revocation records and
/// refresh tokens age out without any sweeper.
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> AuthResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthError::store(format!("pool: {e}")))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> AuthResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(key, value, ttl_seconds)
            .await
            .map_err(|e| AuthError::store(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AuthError::store(e.to_string()))?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .del(key)
            .await
            .map_err(|e| AuthError::store(e.to_string()))?;
        Ok(())
    }
}
