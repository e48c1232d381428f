//! Error response handling for the auth extractors.
//!
//! Implements `IntoResponse` for `AuthError` so extractor rejections and
//! handler failures map straight to HTTP. Bodies use the `{"detail": ...}`
//! shape the rest of the API speaks; 401 responses carry
//! `WWW-Authenticate: Bearer`.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, detail) = error_details(&self);

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED {
            headers.insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }

        (status, headers, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Maps an auth error to its HTTP status and user-facing detail.
fn error_details(err: &AuthError) -> (StatusCode, String) {
    match err {
        AuthError::Credentials { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        AuthError::MissingCredentials { message } => {
            (StatusCode::UNAUTHORIZED, message.clone())
        }
        AuthError::InvalidToken { .. } => (
            StatusCode::UNAUTHORIZED,
            "Could not validate credentials".to_string(),
        ),
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token has expired".to_string()),
        AuthError::TokenRevoked => {
            (StatusCode::UNAUTHORIZED, "Token has been revoked".to_string())
        }
        AuthError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
        AuthError::UserNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        AuthError::Store { .. } | AuthError::Storage { .. } | AuthError::Internal { .. } => {
            // Infrastructure detail stays in the logs, not the response.
            error!(error = %err, "Auth infrastructure failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}
