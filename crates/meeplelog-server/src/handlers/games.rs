//! Game catalog endpoints. Writes are admin-gated; reads are public.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use meeplelog_auth::AdminUser;
use meeplelog_core::{
    CoreError, Game, game::validate_player_range, game::validate_weight, is_reserved_name,
};
use meeplelog_storage::GameUpdate;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GameCreateRequest {
    pub name: String,
    pub weight: f64,
    pub min_players: u32,
    pub max_players: u32,
}

/// `POST /api/v1/games/create`
pub async fn create(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(request): Json<GameCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = request.name.trim().to_lowercase();
    if name.is_empty() {
        return Err(CoreError::validation("Game name must not be empty.").into());
    }
    if is_reserved_name(&name) {
        return Err(CoreError::not_acceptable("Could not use this name").into());
    }

    let game = Game {
        name,
        weight: request.weight,
        min_players: request.min_players,
        max_players: request.max_players,
    };
    game.validate()?;

    state.games.create(&game).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// `GET /api/v1/games/list`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    Ok(Json(state.games.list().await?))
}

/// `GET /api/v1/games/list/{game_name}`
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(game_name): Path<String>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .games
        .find_by_name(&game_name)
        .await?
        .ok_or_else(|| CoreError::not_found(format!("Game [{game_name}]")))?;

    Ok(Json(game))
}

/// `PATCH /api/v1/games/patch/{game_name}`
///
/// Partial update over the enumerated mutable fields. The player-range
/// invariant is checked against the effective values (patched where
/// given, current otherwise), like weight against its fixed bounds.
pub async fn patch(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(game_name): Path<String>,
    Json(mut update): Json<GameUpdate>,
) -> Result<Json<Game>, ApiError> {
    if update.is_empty() {
        return Err(CoreError::validation("No fields to update.").into());
    }

    let game = state
        .games
        .find_by_name(&game_name)
        .await?
        .ok_or_else(|| CoreError::not_found(format!("Game [{game_name}]")))?;

    if let Some(new_name) = &update.name {
        let normalized = new_name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::validation("Game name must not be empty.").into());
        }
        if is_reserved_name(&normalized) {
            return Err(CoreError::not_acceptable("Could not use this name").into());
        }
        update.name = Some(normalized);
    }

    if let Some(weight) = update.weight {
        validate_weight(weight)?;
    }

    let effective_min = update.min_players.unwrap_or(game.min_players);
    let effective_max = update.max_players.unwrap_or(game.max_players);
    validate_player_range(effective_min, effective_max)?;

    let updated = state.games.update(&game.name, &update).await?;
    Ok(Json(updated))
}

/// `DELETE /api/v1/games/delete/{game_name}`
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(game_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.games.delete(&game_name).await?;
    Ok(Json(json!({ "detail": format!("Game [{game_name}] deleted.") })))
}
