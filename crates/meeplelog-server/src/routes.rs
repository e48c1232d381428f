//! Router assembly.

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{self, game_logs, games, likes, users};
use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let users_routes = Router::new()
        .route("/create", post(users::create))
        .route("/login", post(users::login))
        .route("/refresh", post(users::refresh))
        .route("/logout", post(users::logout))
        .route("/list", get(users::list))
        .route("/list/me", get(users::me))
        .route("/list/deactivate", get(users::list_deactivated))
        .route("/list/{user_name}", get(users::get_by_name))
        .route("/patch", patch(users::patch))
        .route("/deactivate", patch(users::deactivate))
        .route("/reset-password", post(users::reset_password))
        .route("/reset-password/confirm", post(users::reset_password_confirm))
        .route("/restore", post(users::restore))
        .route("/restore/confirm", post(users::restore_confirm))
        .route("/sweep", post(users::sweep));

    let games_routes = Router::new()
        .route("/create", post(games::create))
        .route("/list", get(games::list))
        .route("/list/{game_name}", get(games::get_by_name))
        .route("/patch/{game_name}", patch(games::patch))
        .route("/delete/{game_name}", delete(games::delete));

    let game_logs_routes = Router::new()
        .route("/create", post(game_logs::create))
        .route("/list/all", get(game_logs::list_all))
        .route("/list/my", get(game_logs::list_my))
        .route("/list/my/{game_name}", get(game_logs::list_my_by_game))
        .route("/list/{game_name}", get(game_logs::list_by_game));

    let likes_routes = Router::new()
        .route("/create/{game_log_id}", post(likes::create))
        .route("/is_liked/{game_log_id}", get(likes::is_liked))
        .route("/list/{game_log_id}", get(likes::list))
        .route("/update/{game_log_id}", patch(likes::update))
        .route("/delete", delete(likes::delete));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .nest("/api/v1/users", users_routes)
        .nest("/api/v1/games", games_routes)
        .nest("/api/v1/game_logs", game_logs_routes)
        .nest("/api/v1/game_log_like", likes_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
