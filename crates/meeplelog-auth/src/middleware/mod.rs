//! Request-side authentication: bearer extraction, current-user
//! resolution, and the HTTP mapping for auth errors.

pub mod auth;
pub mod error;

pub use auth::{AdminUser, AuthState, BearerToken, CurrentUser, resolve_current_user};
