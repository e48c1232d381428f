//! Storage contracts owned by the auth layer.

pub mod user;

pub use user::{User, UserStorage, UserUpdate};
