//! PostgreSQL like storage.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_core::query_scalar::query_scalar;
use sqlx_postgres::PgPool;

use meeplelog_core::GameLogLike;
use meeplelog_storage::{LikeStorage, StorageError};

use crate::error::to_storage_error;

type LikeTuple = (i64, String, i64, bool);

fn from_tuple(row: LikeTuple) -> GameLogLike {
    GameLogLike {
        id: row.0,
        user_name: row.1,
        game_log_id: row.2,
        active: row.3,
    }
}

/// [`LikeStorage`] backed by the `game_log_likes` table.
pub struct PostgresLikeStorage {
    pool: PgPool,
}

impl PostgresLikeStorage {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStorage for PostgresLikeStorage {
    async fn create(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<GameLogLike, StorageError> {
        let row: LikeTuple = query_as(
            r#"
            INSERT INTO game_log_likes (user_name, game_log_id, active)
            VALUES ($1, $2, TRUE)
            RETURNING id, user_name, game_log_id, active
            "#,
        )
        .bind(user_name)
        .bind(game_log_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            to_storage_error(
                e,
                &format!("Like by [{user_name}] on log [{game_log_id}]"),
            )
        })?;

        Ok(from_tuple(row))
    }

    async fn find(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<Option<GameLogLike>, StorageError> {
        let row: Option<LikeTuple> = query_as(
            r#"
            SELECT id, user_name, game_log_id, active
            FROM game_log_likes
            WHERE game_log_id = $1 AND user_name = $2
            "#,
        )
        .bind(game_log_id)
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(row.map(from_tuple))
    }

    async fn list_active(
        &self,
        game_log_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<GameLogLike>, StorageError> {
        let rows: Vec<LikeTuple> = query_as(
            r#"
            SELECT id, user_name, game_log_id, active
            FROM game_log_likes
            WHERE game_log_id = $1 AND active = TRUE
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(game_log_id)
        .bind(skip as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(rows.into_iter().map(from_tuple).collect())
    }

    async fn toggle(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<GameLogLike, StorageError> {
        let row: Option<LikeTuple> = query_as(
            r#"
            UPDATE game_log_likes
            SET active = NOT active
            WHERE game_log_id = $1 AND user_name = $2
            RETURNING id, user_name, game_log_id, active
            "#,
        )
        .bind(game_log_id)
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

        row.map(from_tuple).ok_or_else(|| {
            StorageError::not_found(format!(
                "Like by [{user_name}] on log [{game_log_id}]"
            ))
        })
    }

    async fn count_active(&self, game_log_id: i64) -> Result<i64, StorageError> {
        let count: i64 = query_scalar(
            "SELECT COUNT(*) FROM game_log_likes WHERE game_log_id = $1 AND active = TRUE",
        )
        .bind(game_log_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(count)
    }

    async fn purge_inactive(&self) -> Result<u64, StorageError> {
        let result = query("DELETE FROM game_log_likes WHERE active = FALSE")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
