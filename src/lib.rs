pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod session;
pub mod views;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub sessions: session::SessionStore,
}

impl axum::extract::FromRef<AppState> for session::SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
