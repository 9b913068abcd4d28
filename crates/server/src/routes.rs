//! API route handlers

use axum::{extract::State, Json};
use prediction_facade::{FeatureImportance, HealthReport, PredictionRequest, PredictionResponse};

use crate::error::ApiError;
use crate::AppState;

pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "delivery-eta",
        "description": "Delivery time estimation with logistics anomaly warnings",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /predict": "Estimate delivery days for one order",
            "GET /health": "Model readiness and stored evaluation metrics",
            "GET /health/live": "Liveness probe",
            "GET /model/importance": "Regressor feature importances"
        }
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    Ok(Json(state.predictor.predict(&request)?))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.predictor.health())
}

pub async fn importance(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeatureImportance>>, ApiError> {
    Ok(Json(state.predictor.feature_importance()?))
}
