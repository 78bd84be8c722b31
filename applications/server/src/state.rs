/// Shared application state
use crate::services::AuthService;
use countdown_storage::SqliteStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<SqliteStore>, auth_service: Arc<AuthService>) -> Self {
        Self {
            store,
            auth_service,
        }
    }
}
