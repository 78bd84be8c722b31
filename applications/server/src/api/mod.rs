/// API route modules
pub mod albums;
pub mod auth;
pub mod extract;
pub mod health;
pub mod progress;
pub mod ratings;

use crate::{middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Routes served under `/api`
pub fn routes(app_state: &AppState) -> Router<AppState> {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Session
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Progress
        .route("/progress", get(progress::get_progress))
        .route("/progress/initialize", post(progress::initialize))
        .route("/progress/complete", post(progress::complete))
        // Catalog
        .route("/albums", get(albums::list_albums))
        // Ratings
        .route(
            "/ratings",
            get(ratings::list_ratings).post(ratings::submit_rating),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
