use crate::domain::models::LearningPath;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_paths))
        .route("/:id", get(get_path))
        .with_state(state)
}

async fn list_paths(
    State(state): State<SharedState>,
) -> Result<Json<Vec<LearningPath>>, StatusCode> {
    let paths = state.storage.get_learning_paths().await.map_err(|e| {
        tracing::error!("Failed to fetch learning paths: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(paths))
}

async fn get_path(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<LearningPath>, StatusCode> {
    let path = state.storage.get_learning_path(&id).await.map_err(|e| {
        tracing::error!("Failed to fetch learning path {id}: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    path.map(Json).ok_or(StatusCode::NOT_FOUND)
}
