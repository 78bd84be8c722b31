/// Health check API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub album_count: i64,
}

/// GET /api/health - Health check endpoint, touches the database
pub async fn health(State(app_state): State<AppState>) -> Result<Json<HealthResponse>> {
    let album_count = countdown_storage::albums::count(app_state.store.pool()).await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        album_count,
    }))
}
