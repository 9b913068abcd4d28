//! Prediction response payload.

use serde::{Deserialize, Serialize};

/// Estimate plus the stored quality metrics of the model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Estimated delivery time in days, never negative.
    pub predicted_days: f64,
    /// Held-out mean absolute error of the loaded model.
    pub mae: f64,
    /// Held-out R² of the loaded model.
    pub r2_score: f64,
    /// Anomaly warning first, then out-of-range features, then unknown
    /// categories.
    pub warnings: Vec<String>,
}
