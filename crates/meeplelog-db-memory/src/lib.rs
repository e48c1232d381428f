//! In-memory storage backends.
//!
//! Every storage trait in the system has a HashMap-backed implementation
//! here. Tests run against these, and the server can boot on them when no
//! database is configured.

pub mod game_logs;
pub mod games;
pub mod likes;
pub mod users;

pub use game_logs::InMemoryGameLogStorage;
pub use games::InMemoryGameStorage;
pub use likes::InMemoryLikeStorage;
pub use users::InMemoryUserStorage;
