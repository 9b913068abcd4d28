//! Delivery predictor trait definition.

use regressor_spi::FeatureImportance;

use crate::error::Result;
use crate::model::{HealthReport, PredictionRequest, PredictionResponse};

/// Request-level delivery time prediction.
///
/// Implementations hold a trained model that is never mutated while serving,
/// so `predict` takes `&self` and may be called from many tasks at once.
pub trait DeliveryPredictor: Send + Sync {
    /// Validate, featurize and score one request.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse>;

    /// Readiness and the stored metrics of the loaded model.
    fn health(&self) -> HealthReport;

    /// Regressor feature importances, most important first.
    fn feature_importance(&self) -> Result<Vec<FeatureImportance>>;

    fn is_ready(&self) -> bool {
        self.health().status == crate::model::HealthStatus::Ready
    }
}
