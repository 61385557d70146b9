use crate::domain::models::{ProgressPatch, UserProgress};
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
        .route("/", get(list_progress))
        .route("/:course_id", get(course_progress).post(update_progress))
        .with_state(state)
}

async fn list_progress(
    State(state): State<SharedState>,
) -> Result<Json<Vec<UserProgress>>, StatusCode> {
    let progress = state.storage.get_user_progress().await.map_err(|e| {
        tracing::error!("Failed to fetch progress: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(progress))
}

/// A course that was never started answers with `null`, not a 404; the
/// course page treats both states the same way.
async fn course_progress(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
) -> Result<Json<Option<UserProgress>>, StatusCode> {
    let progress = state
        .storage
        .get_course_progress(&course_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch progress for course {course_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(progress))
}

async fn update_progress(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
    Json(patch): Json<ProgressPatch>,
) -> Result<Json<UserProgress>, StatusCode> {
    let progress = state
        .storage
        .update_progress(&course_id, patch)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update progress for course {course_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(progress))
}
