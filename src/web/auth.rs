use crate::domain::models::User;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

/// Identity is owned by an external provider; this surface only echoes the
/// stored user record for the active session. The single-tenant demo
/// deployment pins that session to the seeded user.
const SESSION_USER_ID: &str = "demo";

pub fn router(state: SharedState) -> Router {
    Router::new().route("/user", get(current_user)).with_state(state)
}

async fn current_user(State(state): State<SharedState>) -> Result<Json<User>, StatusCode> {
    let user = state.storage.get_user(SESSION_USER_ID).await.map_err(|e| {
        tracing::error!("Failed to fetch user: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    user.map(Json).ok_or(StatusCode::UNAUTHORIZED)
}
