use crate::domain::models::UserPreferences;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(get_preferences).post(save_preferences))
        .with_state(state)
}

async fn get_preferences(
    State(state): State<SharedState>,
) -> Result<Json<Option<UserPreferences>>, StatusCode> {
    let preferences = state.storage.get_preferences().await.map_err(|e| {
        tracing::error!("Failed to fetch preferences: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(preferences))
}

async fn save_preferences(
    State(state): State<SharedState>,
    Json(preferences): Json<UserPreferences>,
) -> Result<Json<UserPreferences>, StatusCode> {
    let saved = state
        .storage
        .save_preferences(preferences)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save preferences: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(saved))
}
