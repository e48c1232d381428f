//! Like entity for game logs.

use serde::{Deserialize, Serialize};

/// A user's like on a game log.
///
/// The `(user_name, game_log_id)` pair is unique; pressing like again
/// toggles `active` instead of inserting a second row. Inactive rows are
/// kept until an admin purges them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLogLike {
    pub id: i64,
    pub user_name: String,
    pub game_log_id: i64,
    /// Whether the like currently counts toward the log's `like_count`.
    pub active: bool,
}
