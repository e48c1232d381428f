//! Request-layer error type.
//!
//! Handlers return `ApiError`, which unifies the three lower error enums
//! and maps each to an HTTP response with a `{"detail": ...}` body. Auth
//! errors keep their own `IntoResponse` from `meeplelog-auth` so the
//! WWW-Authenticate handling lives in one place.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use meeplelog_auth::AuthError;
use meeplelog_core::CoreError;
use meeplelog_storage::StorageError;

/// Unified handler error.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    Storage(StorageError),
    Auth(AuthError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Auth(err) => err.into_response(),
            Self::Core(err) => {
                let status = match &err {
                    CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CoreError::Conflict { .. } => StatusCode::CONFLICT,
                    CoreError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    CoreError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
                    CoreError::Json(_) | CoreError::Internal { .. } => {
                        error!(error = %err, "Internal failure");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    "Internal server error".to_string()
                } else {
                    err.to_string()
                };
                (status, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Storage(err) => {
                let status = match &err {
                    StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                    StorageError::AlreadyExists { .. } => StatusCode::CONFLICT,
                    StorageError::Backend { .. } | StorageError::Serialization { .. } => {
                        error!(error = %err, "Storage failure");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    "Internal server error".to_string()
                } else {
                    err.to_string()
                };
                (status, Json(json!({ "detail": detail }))).into_response()
            }
        }
    }
}
