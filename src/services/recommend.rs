//! AI-assisted recommendation generation.
//!
//! One capability, two implementations: a live provider backed by the
//! Gemini `generateContent` endpoint, and a deterministic fallback derived
//! from the stored catalog. The service tries the live provider when one is
//! configured and silently falls back otherwise, so callers always receive
//! a schema-conformant response and can never tell the two sources apart.

use crate::domain::models::{Category, Difficulty};
use crate::domain::recommendation::{Recommendation, RecommendationRequest};
use crate::storage::Storage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned no content")]
    Empty,
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Input for project idea generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBrief {
    pub skills: Vec<String>,
    pub difficulty: Difficulty,
    pub category: Category,
}

/// A generated, not-yet-cataloged project idea. Same contract whether it
/// came from the model or the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
}

#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend_path(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, ProviderError>;

    async fn generate_project(
        &self,
        brief: &ProjectBrief,
    ) -> Result<GeneratedProject, ProviderError>;
}

/// Live provider speaking to the Gemini REST API.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: GEMINI_MODEL.to_string(),
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{GEMINI_BASE_URL}/models/{model}:generateContent",
            model = self.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or(ProviderError::Empty)
    }
}

#[async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn recommend_path(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, ProviderError> {
        let goals = if request.goals.is_empty() {
            "Learn new skills".to_string()
        } else {
            request.goals.join(", ")
        };
        let skills = if request.skills.is_empty() {
            "Beginner".to_string()
        } else {
            request.skills.join(", ")
        };
        let prompt = format!(
            "Based on the following learner profile, recommend a personalized learning path:\n\n\
             Goals: {goals}\n\
             Current Skills: {skills}\n\
             Current Level: {level}\n\
             Weekly Time Commitment: {time}\n\n\
             Respond with ONLY valid JSON in this format (no markdown, no code blocks):\n\
             {{\n\
               \"title\": \"Learning Path Title\",\n\
               \"description\": \"Brief description of the path\",\n\
               \"estimatedDuration\": \"X months\",\n\
               \"courses\": [],\n\
               \"skills\": [\"skill1\", \"skill2\"],\n\
               \"reasoning\": \"Why this path is recommended\"\n\
             }}",
            level = request.current_level.as_str(),
            time = request.time_available,
        );

        let text = self.generate_text(&prompt).await?;
        // All or nothing: a partially valid object is treated as no
        // response at all.
        serde_json::from_str(extract_json(&text))
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }

    async fn generate_project(
        &self,
        brief: &ProjectBrief,
    ) -> Result<GeneratedProject, ProviderError> {
        let skills = if brief.skills.is_empty() {
            "Web development basics".to_string()
        } else {
            brief.skills.join(", ")
        };
        let prompt = format!(
            "Generate a practical project idea for a learner with the following profile:\n\n\
             Skills: {skills}\n\
             Desired Difficulty: {difficulty}\n\
             Category: {category}\n\n\
             Create a unique, portfolio-worthy project. Respond with ONLY valid JSON \
             (no markdown, no code blocks):\n\
             {{\n\
               \"title\": \"Project Title\",\n\
               \"description\": \"Project description\",\n\
               \"difficulty\": \"{difficulty}\",\n\
               \"estimatedTime\": \"X hours\",\n\
               \"skills\": [\"required\", \"skills\"],\n\
               \"requirements\": [\"requirement 1\", \"requirement 2\"],\n\
               \"learningOutcomes\": [\"outcome 1\", \"outcome 2\"]\n\
             }}",
            difficulty = brief.difficulty.as_str(),
            category = brief.category.as_str(),
        );

        let text = self.generate_text(&prompt).await?;
        serde_json::from_str(extract_json(&text))
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

/// Models occasionally wrap the JSON in a code fence despite instructions;
/// strip it before parsing.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Chooses between the configured provider and the deterministic fallback.
/// Provider errors and malformed responses both end in the fallback, never
/// at the caller.
#[derive(Clone)]
pub struct RecommendationService {
    provider: Option<Arc<dyn RecommendationProvider>>,
    storage: Arc<dyn Storage>,
}

impl RecommendationService {
    pub fn new(provider: Option<Arc<dyn RecommendationProvider>>, storage: Arc<dyn Storage>) -> Self {
        Self { provider, storage }
    }

    pub async fn recommend_path(&self, request: &RecommendationRequest) -> Recommendation {
        if let Some(provider) = &self.provider {
            match provider.recommend_path(request).await {
                Ok(recommendation) => return recommendation,
                Err(err) => {
                    tracing::warn!("Recommendation provider failed, serving fallback: {err}");
                }
            }
        }
        self.fallback_path().await
    }

    pub async fn generate_project(&self, brief: &ProjectBrief) -> GeneratedProject {
        if let Some(provider) = &self.provider {
            match provider.generate_project(brief).await {
                Ok(project) => return project,
                Err(err) => {
                    tracing::warn!("Project provider failed, serving fallback: {err}");
                }
            }
        }
        fallback_project(brief)
    }

    /// Deterministic recommendation from the first stored learning path,
    /// or a fixed literal when the catalog is empty.
    async fn fallback_path(&self) -> Recommendation {
        let first = self
            .storage
            .get_learning_paths()
            .await
            .ok()
            .and_then(|paths| paths.into_iter().next());

        match first {
            Some(path) => Recommendation {
                title: path.title,
                description: path.description,
                estimated_duration: path.estimated_duration,
                courses: path.courses,
                skills: path.skills,
                reasoning: "This path covers essential skills for modern web development and \
                            provides a strong foundation for your learning journey."
                    .to_string(),
            },
            None => Recommendation {
                title: "Full-Stack Web Developer".to_string(),
                description: "Based on your goals, we recommend starting with web development \
                              fundamentals."
                    .to_string(),
                estimated_duration: "6 months".to_string(),
                courses: vec!["1".to_string(), "7".to_string()],
                skills: vec![
                    "HTML".to_string(),
                    "CSS".to_string(),
                    "JavaScript".to_string(),
                    "React".to_string(),
                ],
                reasoning: "This path covers essential skills for modern web development."
                    .to_string(),
            },
        }
    }
}

fn fallback_project(brief: &ProjectBrief) -> GeneratedProject {
    GeneratedProject {
        title: "Interactive Web Dashboard".to_string(),
        description: "Build a responsive dashboard displaying dynamic data with charts and \
                      user interactions."
            .to_string(),
        difficulty: brief.difficulty,
        estimated_time: "20 hours".to_string(),
        skills: if brief.skills.is_empty() {
            vec![
                "HTML".to_string(),
                "CSS".to_string(),
                "JavaScript".to_string(),
            ]
        } else {
            brief.skills.clone()
        },
        requirements: vec![
            "Responsive layout design".to_string(),
            "Data visualization with charts".to_string(),
            "User authentication flow".to_string(),
            "API integration".to_string(),
        ],
        learning_outcomes: vec![
            "Master responsive design techniques".to_string(),
            "Implement data visualization".to_string(),
            "Handle user state and authentication".to_string(),
            "Work with REST APIs".to_string(),
        ],
    }
}
