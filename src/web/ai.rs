use crate::domain::models::{Category, Difficulty};
use crate::domain::recommendation::{Recommendation, RecommendationRequest};
use crate::middleware::rate_limit::ai_quota_middleware;
use crate::services::recommend::{GeneratedProject, ProjectBrief};
use crate::state::SharedState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/recommend-path", post(recommend_path))
        .route("/generate-project", post(generate_project))
        .route_layer(axum::middleware::from_fn_with_state(
            state.ai_quota.clone(),
            ai_quota_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendPathBody {
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    goals: Vec<String>,
    current_level: Option<Difficulty>,
    time_available: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecommendPathResponse {
    recommendation: Recommendation,
}

/// Never fails from the caller's point of view: provider trouble of any
/// kind ends in the deterministic fallback with the same response shape.
async fn recommend_path(
    State(state): State<SharedState>,
    Json(body): Json<RecommendPathBody>,
) -> Json<RecommendPathResponse> {
    let mut request = RecommendationRequest::from_profile(
        body.skills,
        body.current_level.unwrap_or(Difficulty::Beginner),
    );
    if !body.goals.is_empty() {
        request.goals = body.goals;
    }
    if let Some(time_available) = body.time_available {
        request.time_available = time_available;
    }

    let recommendation = state.recommender.recommend_path(&request).await;
    Json(RecommendPathResponse { recommendation })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateProjectBody {
    #[serde(default)]
    skills: Vec<String>,
    difficulty: Option<Difficulty>,
    category: Option<Category>,
}

#[derive(Debug, Serialize)]
struct GenerateProjectResponse {
    project: GeneratedProject,
}

async fn generate_project(
    State(state): State<SharedState>,
    Json(body): Json<GenerateProjectBody>,
) -> Json<GenerateProjectResponse> {
    let brief = ProjectBrief {
        skills: body.skills,
        difficulty: body.difficulty.unwrap_or(Difficulty::Intermediate),
        category: body.category.unwrap_or(Category::Development),
    };
    let project = state.recommender.generate_project(&brief).await;
    Json(GenerateProjectResponse { project })
}
