/// Album catalog API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use countdown_core::{catalog, Album};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AlbumsResponse {
    pub albums: Vec<Album>,
}

/// GET /api/albums - full catalog, rank 500 first
pub async fn list_albums(State(app_state): State<AppState>) -> Result<Json<AlbumsResponse>> {
    let albums = catalog::list_all(app_state.store.as_ref()).await?;
    Ok(Json(AlbumsResponse { albums }))
}
