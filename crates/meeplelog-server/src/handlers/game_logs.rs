//! Game log endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use meeplelog_auth::CurrentUser;
use meeplelog_core::{CoreError, Game, GameLog, is_reserved_name};
use meeplelog_storage::{GameLogFilter, NewGameLog};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GameLogCreateRequest {
    pub game_name: String,
    pub subject: String,
    pub content: Option<String>,
    pub picture: Option<String>,
    pub duration_minutes: u32,
    pub participant_count: u32,
}

async fn require_game(state: &AppState, game_name: &str) -> Result<Game, ApiError> {
    state
        .games
        .find_by_name(game_name)
        .await?
        .ok_or_else(|| CoreError::not_found(format!("Game [{game_name}]")).into())
}

/// `POST /api/v1/game_logs/create`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<GameLogCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if is_reserved_name(&request.game_name) {
        return Err(CoreError::not_acceptable("Could not use this name").into());
    }
    if request.subject.trim().is_empty() {
        return Err(CoreError::validation("Subject must not be empty.").into());
    }

    let game_name = request.game_name.trim().to_lowercase();
    let game = require_game(&state, &game_name).await?;

    if !game.accepts_participants(request.participant_count) {
        return Err(CoreError::validation(format!(
            "Participant count must be between {} and {}.",
            game.min_players, game.max_players
        ))
        .into());
    }

    let log = state
        .game_logs
        .create(&NewGameLog {
            user_name: user.name,
            game_name: game.name,
            subject: request.subject,
            content: request.content,
            picture: request.picture,
            duration_minutes: request.duration_minutes,
            participant_count: request.participant_count,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(log)))
}

/// `GET /api/v1/game_logs/list/all`
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<GameLog>>, ApiError> {
    Ok(Json(state.game_logs.list(&GameLogFilter::default()).await?))
}

/// `GET /api/v1/game_logs/list/my`
pub async fn list_my(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<GameLog>>, ApiError> {
    let logs = state
        .game_logs
        .list(&GameLogFilter::by_user(user.name))
        .await?;
    Ok(Json(logs))
}

/// `GET /api/v1/game_logs/list/{game_name}`
pub async fn list_by_game(
    State(state): State<AppState>,
    Path(game_name): Path<String>,
) -> Result<Json<Vec<GameLog>>, ApiError> {
    let game = require_game(&state, &game_name).await?;
    let logs = state
        .game_logs
        .list(&GameLogFilter::by_game(game.name))
        .await?;
    Ok(Json(logs))
}

/// `GET /api/v1/game_logs/list/my/{game_name}`
pub async fn list_my_by_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_name): Path<String>,
) -> Result<Json<Vec<GameLog>>, ApiError> {
    let game = require_game(&state, &game_name).await?;
    let logs = state
        .game_logs
        .list(&GameLogFilter {
            user_name: Some(user.name),
            game_name: Some(game.name),
        })
        .await?;
    Ok(Json(logs))
}
