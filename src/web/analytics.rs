use crate::domain::models::Analytics;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

pub fn router(state: SharedState) -> Router {
    Router::new().route("/", get(analytics)).with_state(state)
}

/// One immutable snapshot per fetch. A brand-new user gets legitimate
/// zeros; only a storage failure is an error, so clients can tell "no data
/// yet" from "fetch failed" by the status code alone.
async fn analytics(State(state): State<SharedState>) -> Result<Json<Analytics>, StatusCode> {
    let analytics = state.storage.get_analytics().await.map_err(|e| {
        tracing::error!("Failed to build analytics snapshot: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(analytics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testutil::seeded_state;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn snapshot_carries_the_full_week_and_verbatim_percentages() {
        let state = seeded_state().await;
        let response = router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let snapshot: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let week = snapshot["weeklyActivity"].as_array().unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0]["day"], "Mon");
        assert_eq!(week[6]["day"], "Sun");

        let distribution = snapshot["categoryDistribution"].as_object().unwrap();
        assert!(!distribution.is_empty());
        for value in distribution.values() {
            assert!(value.as_u64().unwrap() <= 100);
        }
        assert!(snapshot["totalCoursesStarted"].as_u64().unwrap() > 0);
    }
}
