//! Like endpoints.
//!
//! The `(user, log)` pair has at most one like row; `create` makes the
//! first one and `update` toggles it afterwards. When a client hits the
//! wrong verb for the row's state, the response points at the right one
//! instead of failing, and every mutation recomputes the log's
//! denormalized `like_count` from the active rows.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use meeplelog_auth::{AdminUser, CurrentUser};
use meeplelog_core::{CoreError, GameLogLike};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LikeListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

async fn require_log(state: &AppState, game_log_id: i64) -> Result<(), ApiError> {
    state
        .game_logs
        .find_by_id(game_log_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::not_found(format!("GameLog [{game_log_id}]")).into())
}

/// Recomputes the denormalized counter from the active like rows.
async fn refresh_like_count(state: &AppState, game_log_id: i64) -> Result<(), ApiError> {
    let count = state.likes.count_active(game_log_id).await?;
    state.game_logs.set_like_count(game_log_id, count).await?;
    Ok(())
}

fn wrong_verb_hint(action: &str, game_log_id: i64, endpoint: String) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Like operation requested",
            "action": action,
            "game_log_id": game_log_id,
            "endpoint": endpoint,
        })),
    )
        .into_response()
}

/// `POST /api/v1/game_log_like/create/{game_log_id}`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_log_id): Path<i64>,
) -> Result<Response, ApiError> {
    require_log(&state, game_log_id).await?;

    if state.likes.find(game_log_id, &user.name).await?.is_some() {
        return Ok(wrong_verb_hint(
            "PATCH",
            game_log_id,
            format!("/api/v1/game_log_like/update/{game_log_id}"),
        ));
    }

    state.likes.create(game_log_id, &user.name).await?;
    refresh_like_count(&state, game_log_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Successfully liked the game log" })),
    )
        .into_response())
}

/// `GET /api/v1/game_log_like/is_liked/{game_log_id}`
pub async fn is_liked(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_log_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let like = state.likes.find(game_log_id, &user.name).await?;
    let is_liked = like.map(|l| l.active).unwrap_or(false);
    Ok(Json(json!({ "is_liked": is_liked })))
}

/// `GET /api/v1/game_log_like/list/{game_log_id}`
pub async fn list(
    State(state): State<AppState>,
    Path(game_log_id): Path<i64>,
    Query(query): Query<LikeListQuery>,
) -> Result<Json<Vec<GameLogLike>>, ApiError> {
    let likes = state
        .likes
        .list_active(
            game_log_id,
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(100),
        )
        .await?;
    Ok(Json(likes))
}

/// `PATCH /api/v1/game_log_like/update/{game_log_id}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_log_id): Path<i64>,
) -> Result<Response, ApiError> {
    require_log(&state, game_log_id).await?;

    if state.likes.find(game_log_id, &user.name).await?.is_none() {
        return Ok(wrong_verb_hint(
            "POST",
            game_log_id,
            format!("/api/v1/game_log_like/create/{game_log_id}"),
        ));
    }

    let toggled = state.likes.toggle(game_log_id, &user.name).await?;
    refresh_like_count(&state, game_log_id).await?;

    Ok(Json(toggled).into_response())
}

/// `DELETE /api/v1/game_log_like/delete` — purges inactive rows, admin
/// only.
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    state.likes.purge_inactive().await?;
    Ok(StatusCode::NO_CONTENT)
}
