//! Catalog game entity.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Inclusive range allowed for a game's complexity weight.
pub const WEIGHT_RANGE: (f64, f64) = (0.0, 5.0);

/// A board game in the catalog.
///
/// Games are identified by their lowercase name. The player range bounds
/// the `participant_count` accepted on game logs referencing this game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Unique catalog name, stored lowercase.
    pub name: String,
    /// Complexity weight in `[0, 5]` (BGG-style).
    pub weight: f64,
    /// Smallest supported player count.
    pub min_players: u32,
    /// Largest supported player count.
    pub max_players: u32,
}

impl Game {
    /// Validates the weight and player-range invariants.
    pub fn validate(&self) -> CoreResult<()> {
        validate_weight(self.weight)?;
        validate_player_range(self.min_players, self.max_players)
    }

    /// Returns `true` if `count` players can play this game.
    pub fn accepts_participants(&self, count: u32) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

/// Checks that a weight lies within [`WEIGHT_RANGE`].
pub fn validate_weight(weight: f64) -> CoreResult<()> {
    if !(WEIGHT_RANGE.0..=WEIGHT_RANGE.1).contains(&weight) || weight.is_nan() {
        return Err(CoreError::validation(
            "Weight value must be between 0 and 5.",
        ));
    }
    Ok(())
}

/// Checks that a player range is non-empty and starts above zero.
pub fn validate_player_range(min: u32, max: u32) -> CoreResult<()> {
    if min == 0 {
        return Err(CoreError::validation(
            "Minimum player count must be greater than zero.",
        ));
    }
    if min > max {
        return Err(CoreError::validation(
            "Minimum player count must not exceed the maximum.",
        ));
    }
    Ok(())
}
