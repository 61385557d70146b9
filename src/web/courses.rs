use crate::domain::models::Course;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

/// Query-side filters. The literal "all" means no filter, matching what the
/// catalog UI sends for an untouched dropdown.
#[derive(Debug, Default, Deserialize)]
pub struct CourseFilter {
    category: Option<String>,
    difficulty: Option<String>,
    provider: Option<String>,
    search: Option<String>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_courses))
        .route("/:id", get(get_course))
        .with_state(state)
}

async fn list_courses(
    State(state): State<SharedState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Json<Vec<Course>>, StatusCode> {
    let mut courses = state.storage.get_courses().await.map_err(|e| {
        tracing::error!("Failed to fetch courses: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if let Some(category) = filter.category.filter(|v| v != "all") {
        courses.retain(|c| c.category.as_str() == category);
    }
    if let Some(difficulty) = filter.difficulty.filter(|v| v != "all") {
        courses.retain(|c| c.difficulty.as_str() == difficulty);
    }
    if let Some(provider) = filter.provider.filter(|v| v != "all") {
        courses.retain(|c| c.provider.as_str() == provider);
    }
    if let Some(search) = filter.search.filter(|v| !v.is_empty()) {
        let needle = search.to_lowercase();
        courses.retain(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
                || c.skills.iter().any(|s| s.to_lowercase().contains(&needle))
        });
    }

    Ok(Json(courses))
}

async fn get_course(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, StatusCode> {
    let course = state.storage.get_course(&id).await.map_err(|e| {
        tracing::error!("Failed to fetch course {id}: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    course.map(Json).ok_or(StatusCode::NOT_FOUND)
}
