use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct RequestCountResponse {
    pub requests: u64,
}

/// Handler returning the process-wide request count
pub async fn read(State(state): State<AppState>) -> AppResult<Json<RequestCountResponse>> {
    let requests = state.counter.read().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read request counter");
        AppError::Internal("Failed to retrieve request count".to_string())
    })?;

    Ok(Json(RequestCountResponse { requests }))
}

/// Handler resetting the request count to zero
pub async fn reset(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.counter.reset().await?;
    tracing::info!("Request count reset");

    Ok(StatusCode::NO_CONTENT)
}
