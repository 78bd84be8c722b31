/// Authentication API routes
use super::extract::ApiJson;
use crate::{
    error::Result,
    middleware::AuthenticatedUser,
    services::accounts,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use countdown_core::{AccountId, Profile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: AccountId,
    pub username: String,
    pub email: String,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    accounts::register(
        app_state.store.as_ref(),
        &app_state.auth_service,
        req.username,
        req.email,
        req.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let session = accounts::authenticate(
        app_state.store.as_ref(),
        &app_state.auth_service,
        req.username,
        req.password,
    )
    .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        access_token: session.access.token,
        token_type: "Bearer".to_string(),
        expires_at: session.access.expires_at,
        user_id: session.profile.id,
        username: session.profile.username,
        email: session.profile.email,
    }))
}

/// POST /api/auth/logout
///
/// Tokens are not tracked server side; the client drops its copy.
pub async fn logout(user: AuthenticatedUser) -> Json<MessageResponse> {
    tracing::info!(account_id = %user.account_id(), "Logout");
    Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    })
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Profile>> {
    let profile = accounts::get_profile(app_state.store.as_ref(), user.account_id()).await?;
    Ok(Json(profile))
}
