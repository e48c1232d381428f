//! Storage abstraction layer for meeplelog resources.
//!
//! This crate defines the traits that storage backends implement for the
//! catalog and logging resources (games, game logs, likes). User accounts
//! are owned by the auth layer and have their own storage contract in
//! `meeplelog-auth`.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use traits::{GameLogStorage, GameStorage, LikeStorage};
pub use types::{GameLogFilter, GameUpdate, NewGameLog};
