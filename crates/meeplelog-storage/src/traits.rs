//! Storage traits for the meeplelog resource layer.
//!
//! This module defines the contracts that all storage backends must
//! implement. Implementations must be thread-safe (`Send + Sync`).

use async_trait::async_trait;
use meeplelog_core::{Game, GameLog, GameLogLike};

use crate::error::StorageError;
use crate::types::{GameLogFilter, GameUpdate, NewGameLog};

/// Storage contract for the game catalog.
///
/// Game names are the identity; backends store them lowercase and compare
/// exactly.
#[async_trait]
pub trait GameStorage: Send + Sync {
    /// Creates a new game.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a game with the same name
    /// exists.
    async fn create(&self, game: &Game) -> Result<(), StorageError>;

    /// Reads a game by name. Returns `None` if absent.
    async fn find_by_name(&self, name: &str) -> Result<Option<Game>, StorageError>;

    /// Lists the whole catalog.
    async fn list(&self) -> Result<Vec<Game>, StorageError>;

    /// Applies a partial update and returns the updated game.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the game does not exist and
    /// `StorageError::AlreadyExists` if a rename collides.
    async fn update(&self, name: &str, update: &GameUpdate) -> Result<Game, StorageError>;

    /// Deletes a game by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the game does not exist.
    async fn delete(&self, name: &str) -> Result<(), StorageError>;
}

/// Storage contract for game session logs.
#[async_trait]
pub trait GameLogStorage: Send + Sync {
    /// Inserts a log and returns it with its assigned id and timestamps.
    async fn create(&self, new_log: &NewGameLog) -> Result<GameLog, StorageError>;

    /// Reads a log by id. Returns `None` if absent.
    async fn find_by_id(&self, id: i64) -> Result<Option<GameLog>, StorageError>;

    /// Lists logs matching the filter, newest first.
    async fn list(&self, filter: &GameLogFilter) -> Result<Vec<GameLog>, StorageError>;

    /// Overwrites the denormalized like counter on a log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the log does not exist.
    async fn set_like_count(&self, id: i64, count: i64) -> Result<(), StorageError>;
}

/// Storage contract for likes on game logs.
///
/// A `(user_name, game_log_id)` pair maps to at most one row; repeat likes
/// toggle the row's `active` flag.
#[async_trait]
pub trait LikeStorage: Send + Sync {
    /// Inserts an active like.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the pair already has a row
    /// (active or not); callers toggle instead.
    async fn create(&self, game_log_id: i64, user_name: &str)
    -> Result<GameLogLike, StorageError>;

    /// Finds the like row for a user/log pair, regardless of `active`.
    async fn find(
        &self,
        game_log_id: i64,
        user_name: &str,
    ) -> Result<Option<GameLogLike>, StorageError>;

    /// Lists active likes on a log with offset/limit paging.
    async fn list_active(
        &self,
        game_log_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<GameLogLike>, StorageError>;

    /// Flips the `active` flag and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the pair has no row yet.
    async fn toggle(&self, game_log_id: i64, user_name: &str)
    -> Result<GameLogLike, StorageError>;

    /// Counts active likes on a log.
    async fn count_active(&self, game_log_id: i64) -> Result<i64, StorageError>;

    /// Deletes every inactive like row. Returns the number removed.
    async fn purge_inactive(&self) -> Result<u64, StorageError>;
}
