use crate::domain::assessment::{replay_session, AssessmentResult, SubmittedAnswer};
use crate::domain::models::AssessmentQuestion;
use crate::state::SharedState;
use crate::storage::Storage;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(questions))
        .route("/results", post(save_result).get(list_results))
        .with_state(state)
}

async fn questions(
    State(state): State<SharedState>,
) -> Result<Json<Vec<AssessmentQuestion>>, StatusCode> {
    let questions = state.storage.get_assessment_questions().await.map_err(|e| {
        tracing::error!("Failed to fetch assessment questions: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(questions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResultBody {
    answers: Vec<SubmittedAnswer>,
}

/// The server derives the score itself: submitted answers are replayed
/// through the quiz engine against the issued question sequence, so a
/// client cannot post a result the engine would not have produced.
async fn save_result(
    State(state): State<SharedState>,
    Json(body): Json<SubmitResultBody>,
) -> Result<Json<AssessmentResult>, StatusCode> {
    let questions = state.storage.get_assessment_questions().await.map_err(|e| {
        tracing::error!("Failed to fetch assessment questions: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let session = replay_session(questions, &body.answers).map_err(|e| {
        tracing::warn!("Rejected assessment submission: {e}");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;
    let outcome = session.score().map_err(|e| {
        tracing::warn!("Rejected incomplete assessment submission: {e}");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;

    let result = AssessmentResult::from_outcome(&outcome, session.answers().to_vec());
    let saved = state
        .storage
        .save_assessment_result(result)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save assessment result: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(saved))
}

async fn list_results(
    State(state): State<SharedState>,
) -> Result<Json<Vec<AssessmentResult>>, StatusCode> {
    let results = state.storage.get_assessment_results().await.map_err(|e| {
        tracing::error!("Failed to fetch assessment results: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testutil::seeded_state;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn questions_endpoint_serves_the_issued_sequence() {
        let state = seeded_state().await;
        let response = router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let questions = body_json(response).await;
        let list = questions.as_array().unwrap();
        assert!(list.len() >= 10);
        assert!(list[0]["options"].as_array().unwrap().len() >= 2);
        assert!(list[0]["correctAnswer"].is_number());
    }

    #[tokio::test]
    async fn submitting_all_correct_answers_scores_one_hundred() {
        let state = seeded_state().await;
        let questions = state.storage.get_assessment_questions().await.unwrap();
        let answers: Vec<serde_json::Value> = questions
            .iter()
            .map(|q| {
                serde_json::json!({
                    "questionId": q.id,
                    "selectedAnswer": q.correct_answer,
                })
            })
            .collect();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/results")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "answers": answers }).to_string(),
            ))
            .unwrap();
        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result = body_json(response).await;
        assert_eq!(result["overallScore"], 100);
        assert_eq!(result["level"], "advanced");

        // The derived result was persisted.
        let stored = state.storage.get_assessment_results().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].overall_score, 100);
    }

    #[tokio::test]
    async fn out_of_order_submission_is_rejected() {
        let state = seeded_state().await;
        let questions = state.storage.get_assessment_questions().await.unwrap();
        // Answers for the right questions but in reversed order.
        let answers: Vec<serde_json::Value> = questions
            .iter()
            .rev()
            .map(|q| {
                serde_json::json!({
                    "questionId": q.id,
                    "selectedAnswer": 0,
                })
            })
            .collect();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/results")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "answers": answers }).to_string(),
            ))
            .unwrap();
        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state
            .storage
            .get_assessment_results()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn partial_submission_is_rejected() {
        let state = seeded_state().await;
        let questions = state.storage.get_assessment_questions().await.unwrap();
        let answers = vec![serde_json::json!({
            "questionId": questions[0].id,
            "selectedAnswer": 0,
        })];

        let request = Request::builder()
            .method(Method::POST)
            .uri("/results")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "answers": answers }).to_string(),
            ))
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
