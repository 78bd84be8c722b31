/// Countdown progress API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use countdown_core::{progress, Album, Completion, CountdownError, ProgressStatus};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct InitializeRequest {
    /// Absent means the default rank; an explicit `null` is rejected
    #[serde(default, deserialize_with = "present_rank")]
    pub album_rank: Option<i64>,
}

fn present_rank<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub all_completed: bool,
    pub current_album: Album,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub message: String,
    pub current_album: Album,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub message: String,
    pub all_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_album: Option<Album>,
}

/// GET /api/progress
pub async fn get_progress(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ProgressResponse>> {
    let status = progress::get_current(app_state.store.as_ref(), user.account_id())
        .await
        .map_err(|e| {
            if e.is_not_found(progress::ENTITY) {
                ServerError::NeedsOnboarding
            } else {
                e.into()
            }
        })?;

    let response = match status {
        ProgressStatus::InProgress(album) => ProgressResponse {
            all_completed: false,
            current_album: album,
            message: None,
        },
        ProgressStatus::AllCompleted(album) => ProgressResponse {
            all_completed: true,
            current_album: album,
            message: Some("All albums completed!".to_string()),
        },
    };

    Ok(Json(response))
}

/// POST /api/progress/initialize
///
/// The body is optional; without one the countdown starts at rank 500.
pub async fn initialize(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    body: Bytes,
) -> Result<(StatusCode, Json<InitializeResponse>)> {
    let req = parse_initialize(&body)?;

    let album = progress::initialize(app_state.store.as_ref(), user.account_id(), req.album_rank)
        .await
        .map_err(|e| match e {
            // Repeat initialization is a bad request, not a resource conflict
            CountdownError::Conflict(msg) => ServerError::BadRequest(msg),
            other => other.into(),
        })?;

    tracing::info!(
        account_id = %user.account_id(),
        rank = %album.rank,
        "Progress initialized"
    );

    Ok((
        StatusCode::CREATED,
        Json(InitializeResponse {
            message: "Progress initialized successfully".to_string(),
            current_album: album,
        }),
    ))
}

fn parse_initialize(body: &[u8]) -> Result<InitializeRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(InitializeRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid request body: {}", e)))
}

/// POST /api/progress/complete
pub async fn complete(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<CompleteResponse>> {
    let completion = progress::complete_current(app_state.store.as_ref(), user.account_id())
        .await
        .map_err(|e| {
            if e.is_not_found(progress::ENTITY) {
                ServerError::NotFound("No progress found for user".to_string())
            } else {
                e.into()
            }
        })?;

    let response = match completion {
        Completion::Advanced(next) => {
            tracing::debug!(account_id = %user.account_id(), rank = %next.rank, "Advanced");
            CompleteResponse {
                message: "Album completed successfully".to_string(),
                all_completed: false,
                next_album: Some(next),
            }
        }
        Completion::AllCompleted => CompleteResponse {
            message: "Congratulations! You've completed all 500 albums!".to_string(),
            all_completed: true,
            next_album: None,
        },
    };

    Ok(Json(response))
}
