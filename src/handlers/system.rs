use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::database::manager;
use crate::error::ApiError;
use crate::state::SharedState;

/// GET /healthz - always 200; the body carries the outcome.
pub async fn healthz(State(state): State<SharedState>) -> Json<Value> {
    match manager::health_check(&state.pool).await {
        Ok(()) => Json(json!({ "status": "ok" })),
        Err(e) => {
            tracing::error!("health check failed: {e}");
            Json(json!({ "status": "error", "message": "Database connection failed" }))
        }
    }
}

/// POST /database/seed
pub async fn seed(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let inserted = state.seed.seed_from_csv().await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "ok", "inserted": inserted })),
    ))
}
