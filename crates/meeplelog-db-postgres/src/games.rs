//! PostgreSQL game catalog storage.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;

use meeplelog_core::Game;
use meeplelog_storage::{GameStorage, GameUpdate, StorageError};

use crate::error::to_storage_error;

type GameTuple = (String, f64, i32, i32);

fn from_tuple(row: GameTuple) -> Game {
    Game {
        name: row.0,
        weight: row.1,
        min_players: row.2 as u32,
        max_players: row.3 as u32,
    }
}

/// [`GameStorage`] backed by the `games` table.
pub struct PostgresGameStorage {
    pool: PgPool,
}

impl PostgresGameStorage {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStorage for PostgresGameStorage {
    async fn create(&self, game: &Game) -> Result<(), StorageError> {
        query("INSERT INTO games (name, weight, min_players, max_players) VALUES ($1, $2, $3, $4)")
            .bind(&game.name)
            .bind(game.weight)
            .bind(game.min_players as i32)
            .bind(game.max_players as i32)
            .execute(&self.pool)
            .await
            .map_err(|e| to_storage_error(e, &format!("Game [{}]", game.name)))?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Game>, StorageError> {
        let row: Option<GameTuple> =
            query_as("SELECT name, weight, min_players, max_players FROM games WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(row.map(from_tuple))
    }

    async fn list(&self) -> Result<Vec<Game>, StorageError> {
        let rows: Vec<GameTuple> =
            query_as("SELECT name, weight, min_players, max_players FROM games ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(rows.into_iter().map(from_tuple).collect())
    }

    async fn update(&self, name: &str, update: &GameUpdate) -> Result<Game, StorageError> {
        let row: Option<GameTuple> = query_as(
            r#"
            UPDATE games
            SET name = COALESCE($2, name),
                weight = COALESCE($3, weight),
                min_players = COALESCE($4, min_players),
                max_players = COALESCE($5, max_players)
            WHERE name = $1
            RETURNING name, weight, min_players, max_players
            "#,
        )
        .bind(name)
        .bind(&update.name)
        .bind(update.weight)
        .bind(update.min_players.map(|v| v as i32))
        .bind(update.max_players.map(|v| v as i32))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let target = update.name.as_deref().unwrap_or(name);
            to_storage_error(e, &format!("Game [{target}]"))
        })?;

        row.map(from_tuple)
            .ok_or_else(|| StorageError::not_found(format!("Game [{name}]")))
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let result = query("DELETE FROM games WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(format!("Game [{name}]")));
        }
        Ok(())
    }
}
