//! Parameter types shared by storage trait methods.

use serde::Deserialize;

/// Partial update for a catalog game.
///
/// Only the fields enumerated here are mutable; anything else in a patch
/// payload is rejected before reaching storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameUpdate {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub min_players: Option<u32>,
    pub max_players: Option<u32>,
}

impl GameUpdate {
    /// Returns `true` when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.weight.is_none()
            && self.min_players.is_none()
            && self.max_players.is_none()
    }
}

/// Insert parameters for a game log; the backend assigns id, timestamps,
/// and a zero like count.
#[derive(Debug, Clone)]
pub struct NewGameLog {
    pub user_name: String,
    pub game_name: String,
    pub subject: String,
    pub content: Option<String>,
    pub picture: Option<String>,
    pub duration_minutes: u32,
    pub participant_count: u32,
}

/// Filter for listing game logs. Empty filter means "all logs".
#[derive(Debug, Clone, Default)]
pub struct GameLogFilter {
    pub user_name: Option<String>,
    pub game_name: Option<String>,
}

impl GameLogFilter {
    /// Logs recorded by one user.
    pub fn by_user(user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            ..Self::default()
        }
    }

    /// Logs for one game.
    pub fn by_game(game_name: impl Into<String>) -> Self {
        Self {
            game_name: Some(game_name.into()),
            ..Self::default()
        }
    }
}
