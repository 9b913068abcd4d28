//! Prediction Core
//!
//! Eager request validation and the [`PredictionService`] that runs a
//! validated request through the trained feature transform, anomaly scorer
//! and regressor of one immutable model artifact.

pub mod service;
pub mod validate;
pub mod warnings;

pub use service::PredictionService;
pub use validate::{validate, MAX_DISTANCE_KM};

// Re-export SPI types for convenience
pub use prediction_spi::{
    DeliveryPredictor, FeatureImportance, FieldViolation, HealthReport, HealthStatus, PredictionError,
    PredictionRequest, PredictionResponse, RequestStage, Result, ValidationError, ZipCode,
};
