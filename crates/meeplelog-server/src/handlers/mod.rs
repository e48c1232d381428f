//! Request handlers, grouped by resource.

pub mod game_logs;
pub mod games;
pub mod likes;
pub mod users;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Service banner.
pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "meeplelog",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

/// Liveness probe.
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
