//! meeplelog HTTP server.
//!
//! Wires the auth subsystem, storage backends, and notification capability
//! into an axum application. `main.rs` drives configuration loading and
//! startup; everything testable lives here.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod observability;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use routes::build_router;
pub use state::{AppState, build_state};
