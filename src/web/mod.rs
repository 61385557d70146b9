pub mod ai;
pub mod analytics;
pub mod assessment;
pub mod auth;
pub mod courses;
pub mod paths;
pub mod preferences;
pub mod progress;
pub mod projects;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/courses", courses::router(state.clone()))
        .nest("/api/learning-paths", paths::router(state.clone()))
        .nest("/api/assessment", assessment::router(state.clone()))
        .nest("/api/progress", progress::router(state.clone()))
        .nest("/api/projects", projects::router(state.clone()))
        .nest("/api/analytics", analytics::router(state.clone()))
        .nest("/api/preferences", preferences::router(state.clone()))
        .nest("/api/ai", ai::router(state))
}
