//! Game session log entity.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A logged play session of a catalog game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLog {
    /// Surrogate identifier.
    pub id: i64,
    /// Name of the user who recorded the session.
    pub user_name: String,
    /// Catalog name of the game that was played.
    pub game_name: String,
    /// Session title.
    pub subject: String,
    /// Free-form session notes.
    pub content: Option<String>,
    /// Optional picture URL.
    pub picture: Option<String>,
    /// How long the session ran, in minutes.
    pub duration_minutes: u32,
    /// How many people played; bounded by the game's player range.
    pub participant_count: u32,
    /// Count of currently-active likes, denormalized onto the log.
    pub like_count: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
