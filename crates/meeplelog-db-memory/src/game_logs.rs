//! In-memory game log storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use meeplelog_core::GameLog;
use meeplelog_storage::{GameLogFilter, GameLogStorage, NewGameLog, StorageError};

/// HashMap-backed [`GameLogStorage`] with an atomic id counter.
pub struct InMemoryGameLogStorage {
    logs: RwLock<HashMap<i64, GameLog>>,
    next_id: AtomicI64,
}

impl InMemoryGameLogStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logs: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl GameLogStorage for InMemoryGameLogStorage {
    async fn create(&self, new_log: &NewGameLog) -> Result<GameLog, StorageError> {
        let now = OffsetDateTime::now_utc();
        let log = GameLog {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_name: new_log.user_name.clone(),
            game_name: new_log.game_name.clone(),
            subject: new_log.subject.clone(),
            content: new_log.content.clone(),
            picture: new_log.picture.clone(),
            duration_minutes: new_log.duration_minutes,
            participant_count: new_log.participant_count,
            like_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.logs.write().await.insert(log.id, log.clone());
        Ok(log)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GameLog>, StorageError> {
        Ok(self.logs.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: &GameLogFilter) -> Result<Vec<GameLog>, StorageError> {
        let mut matching: Vec<GameLog> = self
            .logs
            .read()
            .await
            .values()
            .filter(|log| {
                filter
                    .user_name
                    .as_ref()
                    .is_none_or(|u| &log.user_name == u)
                    && filter
                        .game_name
                        .as_ref()
                        .is_none_or(|g| &log.game_name == g)
            })
            .cloned()
            .collect();

        // Newest first; id breaks ties from same-instant inserts.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching)
    }

    async fn set_like_count(&self, id: i64, count: i64) -> Result<(), StorageError> {
        let mut logs = self.logs.write().await;
        let log = logs
            .get_mut(&id)
            .ok_or_else(|| StorageError::not_found(format!("GameLog [{id}]")))?;
        log.like_count = count;
        log.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }
}
