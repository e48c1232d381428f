//! User endpoints: registration, the token lifecycle, profile updates,
//! and the account recovery flows.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use meeplelog_auth::{
    AdminUser, BearerToken, CurrentUser, User, UserUpdate, password::hash_password,
};
use meeplelog_core::{CoreError, is_reserved_name};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UserCreateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub check_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response: both tokens plus the authenticated name.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Public view of a user; the password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct RestoreConfirmRequest {
    pub token: String,
}

// =============================================================================
// Registration and token lifecycle
// =============================================================================

/// `POST /api/v1/users/create`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<UserCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = request.name.trim();
    let email = request.email.trim();

    if name.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(CoreError::validation("Name, email, and password are required.").into());
    }
    if is_reserved_name(name) {
        return Err(CoreError::not_acceptable("Could not use this name").into());
    }
    if request.password != request.check_password {
        return Err(
            CoreError::not_acceptable("Password and check password do not match.").into(),
        );
    }

    // Soft-deleted rows keep their name and email reserved until the
    // retention sweep frees them.
    if state.users.find_by_name(name, true).await?.is_some() {
        return Err(CoreError::conflict(format!("User [{name}] already exists.")).into());
    }
    if state.users.find_by_email(email, true).await?.is_some() {
        return Err(CoreError::conflict(format!("Email [{email}] is already in use.")).into());
    }

    let user = User::new(name, email, hash_password(&request.password)?);
    state.users.create(&user).await?;

    Ok(StatusCode::CREATED)
}

/// `POST /api/v1/users/login`
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = state.tokens.login(&form.username, &form.password).await?;

    Ok(Json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "bearer",
        name: pair.name,
    }))
}

/// `POST /api/v1/users/refresh` — bearer refresh token in, access token
/// out.
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let access_token = state.tokens.refresh(&token).await?;

    Ok(Json(AccessTokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// `POST /api/v1/users/logout` — revokes the presented access token.
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    state.tokens.logout(&token).await?;
    Ok(Json(json!({ "detail": "Successfully logged out" })))
}

// =============================================================================
// Lookups
// =============================================================================

/// `GET /api/v1/users/list/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// `GET /api/v1/users/list`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// `GET /api/v1/users/list/deactivate` — soft-deleted accounts, admin
/// only.
pub async fn list_deactivated(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_deleted().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// `GET /api/v1/users/list/{user_name}`
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_name(&user_name, false)
        .await?
        .ok_or_else(|| CoreError::not_found(format!("User [{user_name}]")))?;

    Ok(Json(user.into()))
}

// =============================================================================
// Profile updates
// =============================================================================

/// `PATCH /api/v1/users/patch`
///
/// Only the fields enumerated in [`UserUpdate`] are mutable; unknown
/// fields are rejected as 422 by the deserializer before we get here.
pub async fn patch(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>, ApiError> {
    if update.is_empty() {
        return Err(CoreError::validation("No fields to update.").into());
    }

    if let Some(email) = &update.email {
        if email.trim().is_empty() {
            return Err(CoreError::validation("Email must not be empty.").into());
        }
        if *email == user.email {
            return Err(
                CoreError::conflict("Email is identical to the current value.").into(),
            );
        }
        if state.users.find_by_email(email, true).await?.is_some() {
            return Err(
                CoreError::conflict(format!("Email [{email}] is already in use.")).into(),
            );
        }
    }

    let updated = state.users.update_fields(&user.name, &update).await?;
    Ok(Json(updated.into()))
}

// =============================================================================
// Account lifecycle
// =============================================================================

/// `PATCH /api/v1/users/deactivate`
///
/// Soft-deletes the account and revokes the presented access token, so
/// the session ends with this request.
pub async fn deactivate(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    state.recovery.deactivate(&user).await?;
    state.tokens.logout(&token).await?;

    Ok(Json(json!({ "detail": "Account deactivated" })))
}

/// `POST /api/v1/users/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.recovery.request_password_reset(&request.name).await?;
    Ok(Json(json!({ "detail": "Password reset mail requested" })))
}

/// `POST /api/v1/users/reset-password/confirm`
pub async fn reset_password_confirm(
    State(state): State<AppState>,
    Json(request): Json<ResetConfirmRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.new_password.is_empty() {
        return Err(CoreError::validation("New password must not be empty.").into());
    }
    state
        .recovery
        .confirm_password_reset(&request.token, &request.new_password)
        .await?;

    Ok(Json(json!({ "detail": "Password has been reset" })))
}

/// `POST /api/v1/users/restore`
pub async fn restore(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.recovery.request_restore(&request.name).await?;
    Ok(Json(json!({ "detail": "Account restore mail requested" })))
}

/// `POST /api/v1/users/restore/confirm`
pub async fn restore_confirm(
    State(state): State<AppState>,
    Json(request): Json<RestoreConfirmRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.recovery.confirm_restore(&request.token).await?;
    Ok(Json(json!({ "detail": "Account restored" })))
}

/// `POST /api/v1/users/sweep` — admin-triggered retention sweep.
pub async fn sweep(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .recovery
        .hard_delete_sweep(state.config.auth.retention_days)
        .await?;

    Ok(Json(json!({ "removed": removed })))
}
