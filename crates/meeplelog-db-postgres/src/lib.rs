//! PostgreSQL storage backends for meeplelog.
//!
//! Provides persistent storage for:
//!
//! - Users (the auth layer's `UserStorage`)
//! - Games, game logs, and likes (the resource layer's storage traits)
//!
//! Schema lives in `migrations/`; apply it with `psql` or any migration
//! runner before starting the server.
//!
//! # Example
//!
//! ```ignore
//! use meeplelog_db_postgres::{PostgresConfig, create_pool, PostgresUserStorage};
//!
//! let pool = create_pool(&config).await?;
//! let users = PostgresUserStorage::new(pool.clone());
//! ```

pub mod config;
pub mod error;
pub mod game_logs;
pub mod games;
pub mod likes;
pub mod pool;
pub mod users;

pub use config::PostgresConfig;
pub use game_logs::PostgresGameLogStorage;
pub use games::PostgresGameStorage;
pub use likes::PostgresLikeStorage;
pub use pool::create_pool;
pub use users::PostgresUserStorage;

pub use sqlx_postgres::PgPool;
