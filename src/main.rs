use axum::{routing::get_service, Router};
use ignitia::middleware::rate_limit::AiQuota;
use ignitia::services::recommend::{GeminiProvider, RecommendationProvider, RecommendationService};
use ignitia::state::{AppState, SharedState};
use ignitia::storage::{seed, MemStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let storage = Arc::new(MemStorage::new());
    seed::seed_all(&storage).await?;

    let provider: Option<Arc<dyn RecommendationProvider>> = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            tracing::info!("Gemini provider configured");
            Some(Arc::new(GeminiProvider::new(key)))
        }
        _ => {
            tracing::info!("GEMINI_API_KEY not set, serving deterministic recommendations");
            None
        }
    };

    let recommender = RecommendationService::new(provider, storage.clone());
    let ai_quota = AiQuota::new(10, Duration::from_secs(60));

    // Hourly cleanup so idle clients do not pile up in the quota map.
    let sweeper = ai_quota.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            sweeper.sweep().await;
        }
    });

    let shared: SharedState = Arc::new(AppState {
        storage,
        recommender,
        ai_quota,
    });

    let static_handler =
        ServeDir::new("static").not_found_service(ServeFile::new("static/index.html"));

    let app = Router::new()
        .merge(ignitia::web::routes(shared.clone()))
        .fallback_service(get_service(static_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
        let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        format!("0.0.0.0:{port}")
    });
    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
