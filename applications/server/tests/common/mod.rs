//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use countdown_core::{catalog, CreateAlbum, Rank};
use countdown_server::{create_router, services::AuthService, state::AppState};
use countdown_storage::SqliteStore;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Router wired to a throwaway SQLite file holding the full catalog
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_catalog(full_catalog()).await
    }

    pub async fn with_catalog(albums: Vec<CreateAlbum>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = countdown_storage::create_pool(&db_url).await.unwrap();
        countdown_storage::run_migrations(&pool).await.unwrap();
        let store = Arc::new(SqliteStore::new(pool));
        catalog::seed(store.as_ref(), albums).await.unwrap();

        let auth_service = Arc::new(AuthService::new(TEST_SECRET, 1).with_bcrypt_cost(4));
        let app_state = AppState::new(Arc::clone(&store), Arc::clone(&auth_service));
        let router = create_router(app_state, &["http://localhost:5173".to_string()]);

        Self {
            router,
            auth_service,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request, returning the status and the decoded JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };

        (status, body)
    }

    /// Register and log in, returning the bearer token
    pub async fn login_as(&self, username: &str) -> String {
        let (status, _) = self
            .send(post_json(
                "/api/auth/register",
                None,
                serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": TEST_PASSWORD,
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(post_json(
                "/api/auth/login",
                None,
                serde_json::json!({ "username": username, "password": TEST_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);

        body["access_token"].as_str().unwrap().to_string()
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// POST with no body at all
pub fn post_empty(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("POST");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Test fixture: one album
pub fn album(rank: i64) -> CreateAlbum {
    CreateAlbum {
        rank: Rank::new(rank).unwrap(),
        artist: format!("Artist {rank}"),
        title: format!("Album {rank}"),
        info: Some(format!("Label {rank}")),
        description: Some(format!("Description of album {rank}")),
    }
}

/// Test fixture: ranks 500 down to 1
pub fn full_catalog() -> Vec<CreateAlbum> {
    (1..=500).rev().map(album).collect()
}
