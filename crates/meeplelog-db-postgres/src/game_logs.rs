//! PostgreSQL game log storage.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use time::OffsetDateTime;

use meeplelog_core::GameLog;
use meeplelog_storage::{GameLogFilter, GameLogStorage, NewGameLog, StorageError};

type GameLogTuple = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    i32,
    i32,
    i64,
    OffsetDateTime,
    OffsetDateTime,
);

const LOG_COLUMNS: &str = "id, user_name, game_name, subject, content, picture, \
     duration_minutes, participant_count, like_count, created_at, updated_at";

fn from_tuple(row: GameLogTuple) -> GameLog {
    GameLog {
        id: row.0,
        user_name: row.1,
        game_name: row.2,
        subject: row.3,
        content: row.4,
        picture: row.5,
        duration_minutes: row.6 as u32,
        participant_count: row.7 as u32,
        like_count: row.8,
        created_at: row.9,
        updated_at: row.10,
    }
}

/// [`GameLogStorage`] backed by the `game_logs` table.
pub struct PostgresGameLogStorage {
    pool: PgPool,
}

impl PostgresGameLogStorage {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameLogStorage for PostgresGameLogStorage {
    async fn create(&self, new_log: &NewGameLog) -> Result<GameLog, StorageError> {
        let row: GameLogTuple = query_as(&format!(
            r#"
            INSERT INTO game_logs
                (user_name, game_name, subject, content, picture,
                 duration_minutes, participant_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(&new_log.user_name)
        .bind(&new_log.game_name)
        .bind(&new_log.subject)
        .bind(&new_log.content)
        .bind(&new_log.picture)
        .bind(new_log.duration_minutes as i32)
        .bind(new_log.participant_count as i32)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(from_tuple(row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GameLog>, StorageError> {
        let row: Option<GameLogTuple> =
            query_as(&format!("SELECT {LOG_COLUMNS} FROM game_logs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(row.map(from_tuple))
    }

    async fn list(&self, filter: &GameLogFilter) -> Result<Vec<GameLog>, StorageError> {
        // NULL binds make the optional filters fall through.
        let rows: Vec<GameLogTuple> = query_as(&format!(
            r#"
            SELECT {LOG_COLUMNS} FROM game_logs
            WHERE ($1::text IS NULL OR user_name = $1)
              AND ($2::text IS NULL OR game_name = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(&filter.user_name)
        .bind(&filter.game_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(rows.into_iter().map(from_tuple).collect())
    }

    async fn set_like_count(&self, id: i64, count: i64) -> Result<(), StorageError> {
        let result =
            query("UPDATE game_logs SET like_count = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(count)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(format!("GameLog [{id}]")));
        }
        Ok(())
    }
}
