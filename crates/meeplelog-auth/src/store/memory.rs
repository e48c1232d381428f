//! In-memory session store for tests and single-process development.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SessionStore;
use crate::AuthResult;

/// HashMap-backed [`SessionStore`] with lazy TTL eviction.
///
/// Entries past their deadline are treated as absent on read and dropped
/// on the next write to the same key. Good enough for tests; production
/// deployments use [`super::RedisSessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> AuthResult<()> {
        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
