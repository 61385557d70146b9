use crate::middleware::rate_limit::AiQuota;
use crate::services::recommend::RecommendationService;
use crate::storage::Storage;
use std::sync::Arc;

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub recommender: RecommendationService,
    pub ai_quota: AiQuota,
}

pub type SharedState = Arc<AppState>;
