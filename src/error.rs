use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

use crate::auth::TokenError;
use crate::tmdb::TmdbError;

/// Whether 500-level responses may carry the underlying error text.
/// Set once at startup from the environment; defaults to exposed so
/// unit tests and ad-hoc runs see full detail.
static EXPOSE_INTERNAL_DETAIL: OnceLock<bool> = OnceLock::new();

pub fn expose_internal_detail(enabled: bool) {
    let _ = EXPOSE_INTERNAL_DETAIL.set(enabled);
}

fn detail_exposed() -> bool {
    *EXPOSE_INTERNAL_DETAIL.get().unwrap_or(&true)
}

/// Domain error mapped onto HTTP at the response boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400
    #[error("{0}")]
    Validation(String),

    // 401
    #[error("{0}")]
    Unauthorized(String),

    // 404
    #[error("{0}")]
    NotFound(String),

    // 409
    #[error("{0}")]
    Conflict(String),

    // 502 (external metadata service)
    #[error("{0}")]
    BadGateway(String),

    // 500
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::Database(_) | ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Client-facing message. Internal errors are redacted in production mode.
    pub fn message(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) if !detail_exposed() => {
                "An error occurred while processing your request".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Constraint violations are the storage-level guarantee behind the
        // non-transactional check-then-insert paths; surface them as the
        // nearest client error instead of a 500.
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return ApiError::Conflict("Record already exists".to_string());
            }
            if db.is_foreign_key_violation() {
                return ApiError::NotFound("Referenced record not found".to_string());
            }
        }
        ApiError::Database(err)
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingSecret | TokenError::Generation(_) => {
                ApiError::Internal(err.to_string())
            }
            TokenError::Invalid => ApiError::Unauthorized("Invalid or expired token".to_string()),
        }
    }
}

impl From<TmdbError> for ApiError {
    fn from(err: TmdbError) -> Self {
        tracing::error!("movie metadata fetch failed: {err}");
        ApiError::BadGateway("Failed to fetch movie details".to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Internal(format!("password hashing failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let body = json!({
            "error": true,
            "code": self.error_code(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
