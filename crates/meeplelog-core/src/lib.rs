//! Core domain types and error taxonomy shared across the meeplelog crates.

pub mod error;
pub mod game;
pub mod game_log;
pub mod like;

pub use error::{CoreError, CoreResult};
pub use game::Game;
pub use game_log::GameLog;
pub use like::GameLogLike;

/// Name reserved for list routes (`/list/all`, `/list/my`); no user or game
/// may claim it.
pub const RESERVED_NAME: &str = "all";

/// Returns `true` if the given name collides with a reserved route segment.
pub fn is_reserved_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(RESERVED_NAME)
}
