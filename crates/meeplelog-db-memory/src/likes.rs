//! In-memory like storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use meeplelog_core::GameLogLike;
use meeplelog_storage::{LikeStorage, StorageError};

/// HashMap-backed [`LikeStorage`], keyed by `(game_log_id, user_name)`.
pub struct InMemoryLikeStorage {
    likes: RwLock<HashMap<(i64, String), GameLogLike>>,
    next_id: AtomicI64,
}

impl InMemoryLikeStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            likes: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl LikeStorage for InMemoryLikeStorage {
    async fn create(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<GameLogLike, StorageError> {
        let key = (game_log_id, user_name.to_string());
        let mut likes = self.likes.write().await;
        if likes.contains_key(&key) {
            return Err(StorageError::already_exists(format!(
                "Like by [{user_name}] on log [{game_log_id}]"
            )));
        }

        let like = GameLogLike {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_name: user_name.to_string(),
            game_log_id,
            active: true,
        };
        likes.insert(key, like.clone());
        Ok(like)
    }

    async fn find(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<Option<GameLogLike>, StorageError> {
        Ok(self
            .likes
            .read()
            .await
            .get(&(game_log_id, user_name.to_string()))
            .cloned())
    }

    async fn list_active(
        &self,
        game_log_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<GameLogLike>, StorageError> {
        let mut active: Vec<GameLogLike> = self
            .likes
            .read()
            .await
            .values()
            .filter(|like| like.game_log_id == game_log_id && like.active)
            .cloned()
            .collect();
        active.sort_by_key(|like| like.id);

        Ok(active
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn toggle(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<GameLogLike, StorageError> {
        let mut likes = self.likes.write().await;
        let like = likes
            .get_mut(&(game_log_id, user_name.to_string()))
            .ok_or_else(|| {
                StorageError::not_found(format!(
                    "Like by [{user_name}] on log [{game_log_id}]"
                ))
            })?;
        like.active = !like.active;
        Ok(like.clone())
    }

    async fn count_active(&self, game_log_id: i64) -> Result<i64, StorageError> {
        Ok(self
            .likes
            .read()
            .await
            .values()
            .filter(|like| like.game_log_id == game_log_id && like.active)
            .count() as i64)
    }

    async fn purge_inactive(&self) -> Result<u64, StorageError> {
        let mut likes = self.likes.write().await;
        let before = likes.len();
        likes.retain(|_, like| like.active);
        Ok((before - likes.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_row_per_user_and_log() {
        let storage = InMemoryLikeStorage::new();
        storage.create(1, "alice").await.unwrap();

        assert!(matches!(
            storage.create(1, "alice").await,
            Err(StorageError::AlreadyExists { .. })
        ));
        // Same user, different log is fine.
        assert!(storage.create(2, "alice").await.is_ok());
    }

    #[tokio::test]
    async fn toggle_flips_and_count_follows() {
        let storage = InMemoryLikeStorage::new();
        storage.create(1, "alice").await.unwrap();
        storage.create(1, "bob").await.unwrap();
        assert_eq!(storage.count_active(1).await.unwrap(), 2);

        let toggled = storage.toggle(1, "alice").await.unwrap();
        assert!(!toggled.active);
        assert_eq!(storage.count_active(1).await.unwrap(), 1);

        let again = storage.toggle(1, "alice").await.unwrap();
        assert!(again.active);
        assert_eq!(storage.count_active(1).await.unwrap(), 2);

        assert!(matches!(
            storage.toggle(1, "carol").await,
            Err(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn paging_and_purge() {
        let storage = InMemoryLikeStorage::new();
        for user in ["a", "b", "c"] {
            storage.create(1, user).await.unwrap();
        }
        storage.toggle(1, "b").await.unwrap();

        let page = storage.list_active(1, 0, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        let rest = storage.list_active(1, 1, 10).await.unwrap();
        assert_eq!(rest.len(), 1);

        assert_eq!(storage.purge_inactive().await.unwrap(), 1);
        assert!(storage.find(1, "b").await.unwrap().is_none());
        assert_eq!(storage.count_active(1).await.unwrap(), 2);
    }
}
