use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::TokenPair;
use crate::error::ApiError;
use crate::services::auth::AuthPayload;
use crate::state::SharedState;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<SharedState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthPayload>), ApiError> {
    validation::validate_signup(&body.username, &body.email, &body.password)?;
    let payload = state
        .auth
        .signup(&body.username, &body.email, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<SharedState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthPayload>), ApiError> {
    validation::validate_login(&body.email, &body.password)?;
    let payload = state.auth.login(&body.email, &body.password).await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<SharedState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.auth.refresh(&body.refresh_token)?;
    Ok(Json(pair))
}
