//! Health check and metrics endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub bot_username: Option<String>,
}

/// Metrics data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metrics {
    pub messages_received: u64,
    pub registrations: u64,
    pub uploads: u64,
    pub playbacks: u64,
    pub playlist_requests: u64,
    pub errors: u64,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<RwLock<Metrics>>,
    pub start_time: SystemTime,
    pub bot_username: Option<String>,
}

impl AppState {
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            metrics: Arc::new(RwLock::new(Metrics::default())),
            start_time: SystemTime::now(),
            bot_username,
        }
    }

    pub async fn increment_messages_received(&self) {
        self.metrics.write().await.messages_received += 1;
    }

    pub async fn increment_registrations(&self) {
        self.metrics.write().await.registrations += 1;
    }

    pub async fn increment_uploads(&self) {
        self.metrics.write().await.uploads += 1;
    }

    pub async fn increment_playbacks(&self) {
        self.metrics.write().await.playbacks += 1;
    }

    pub async fn increment_playlist_requests(&self) {
        self.metrics.write().await.playlist_requests += 1;
    }

    pub async fn increment_errors(&self) {
        self.metrics.write().await.errors += 1;
    }

    pub async fn snapshot(&self) -> Metrics {
        self.metrics.read().await.clone()
    }

    fn is_ready(&self) -> bool {
        self.bot_username.is_some()
    }
}

/// Health check endpoint handler
async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let uptime = state.start_time.elapsed().unwrap_or_default().as_secs();

    let (status, status_code) = if state.is_ready() {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(HealthStatus {
            status: status.to_string(),
            uptime_seconds: uptime,
            bot_username: state.bot_username.clone(),
        }),
    )
}

/// Metrics endpoint handler
async fn metrics_handler(State(state): State<AppState>) -> Json<Metrics> {
    Json(state.snapshot().await)
}

/// Readiness check (bot authenticated with Telegram)
async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Liveness check (process is alive)
async fn live_handler() -> StatusCode {
    StatusCode::OK
}

/// Create health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/ready", get(ready_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Start health check server
pub async fn start_health_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_health_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Health check server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
