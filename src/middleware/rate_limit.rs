//! In-memory sliding-window limiter for the AI endpoints. Generation calls
//! are the only expensive upstream operations, so they get a per-client
//! budget while the rest of the API stays unthrottled.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AiQuota {
    windows: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    limit: usize,
    window: Duration,
}

impl AiQuota {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            limit,
            window,
        }
    }

    /// Record one request for `key` if its window still has room.
    pub async fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let hits = windows.entry(key.to_string()).or_default();
        while let Some(&oldest) = hits.front() {
            if now.duration_since(oldest) >= self.window {
                hits.pop_front();
            } else {
                break;
            }
        }
        if hits.len() >= self.limit {
            return false;
        }
        hits.push_back(now);
        true
    }

    /// Drop clients whose whole window has expired.
    pub async fn sweep(&self) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        windows.retain(|_, hits| {
            hits.iter()
                .any(|&hit| now.duration_since(hit) < self.window)
        });
        tracing::debug!("AI quota sweep: {} active clients", windows.len());
    }
}

pub async fn ai_quota_middleware(
    State(quota): State<AiQuota>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = addr.ip().to_string();
    if !quota.try_acquire(&key).await {
        tracing::warn!("AI quota exceeded for {key}");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many generation requests. Please try again later.",
        )
            .into_response();
    }
    next.run(request).await
}
