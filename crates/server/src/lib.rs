//! # server
//!
//! REST API for delivery time prediction. The router is built once around an
//! immutable [`DeliveryPredictor`] shared by every handler.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use prediction_facade::{DeliveryPredictor, PredictionService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn DeliveryPredictor>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn DeliveryPredictor>) -> Self {
        Self { predictor }
    }
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the router with CORS and request tracing.
pub fn create_router(predictor: Arc<dyn DeliveryPredictor>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/predict", post(routes::predict))
        .route("/health", get(routes::health))
        .route("/health/live", get(liveness))
        .route("/model/importance", get(routes::importance))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState::new(predictor))
}

/// Load the configured artifact and serve until the process is stopped.
///
/// A missing or unreadable artifact is fatal.
pub async fn run(config: &ServerConfig) -> Result<(), ServerError> {
    let service = PredictionService::load(&config.model_path)?;
    serve(config, Arc::new(service)).await
}

/// Serve an already loaded predictor.
pub async fn serve(config: &ServerConfig, predictor: Arc<dyn DeliveryPredictor>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    let app = create_router(predictor);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("eta-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
