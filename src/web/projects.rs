use crate::domain::models::Project;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    difficulty: Option<String>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_projects))
        .route("/:id", get(get_project))
        .with_state(state)
}

async fn list_projects(
    State(state): State<SharedState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<Vec<Project>>, StatusCode> {
    let mut projects = state.storage.get_projects().await.map_err(|e| {
        tracing::error!("Failed to fetch projects: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if let Some(difficulty) = filter.difficulty.filter(|v| v != "all") {
        projects.retain(|p| p.difficulty.as_str() == difficulty);
    }
    Ok(Json(projects))
}

async fn get_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, StatusCode> {
    let project = state.storage.get_project(&id).await.map_err(|e| {
        tracing::error!("Failed to fetch project {id}: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    project.map(Json).ok_or(StatusCode::NOT_FOUND)
}
