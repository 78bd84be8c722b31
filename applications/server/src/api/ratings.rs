/// Rating API routes
use super::extract::ApiJson;
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use countdown_core::{ratings, RatedAlbum, Rating};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub album_id: Option<i64>,
    pub rating: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub message: String,
    pub rating: Rating,
}

#[derive(Debug, Serialize)]
pub struct RatingsResponse {
    pub ratings: Vec<RatedAlbum>,
}

/// POST /api/ratings - create or replace the caller's rating of an album
pub async fn submit_rating(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<RatingRequest>,
) -> Result<Json<RatingResponse>> {
    let rating = ratings::submit(
        app_state.store.as_ref(),
        user.account_id(),
        req.album_id,
        req.rating,
    )
    .await?;

    tracing::info!(
        account_id = %user.account_id(),
        album_id = %rating.album_id,
        score = %rating.score,
        "Rating submitted"
    );

    Ok(Json(RatingResponse {
        message: "Rating submitted successfully".to_string(),
        rating,
    }))
}

/// GET /api/ratings
pub async fn list_ratings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<RatingsResponse>> {
    let ratings = ratings::list_for_account(app_state.store.as_ref(), user.account_id()).await?;
    Ok(Json(RatingsResponse { ratings }))
}
