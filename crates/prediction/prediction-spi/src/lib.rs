//! Prediction Service Provider Interface
//!
//! Request and response models of the delivery time prediction service, the
//! [`DeliveryPredictor`] contract and the per-request error taxonomy.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::DeliveryPredictor;
pub use error::{FieldViolation, PredictionError, Result, ValidationError};
pub use model::{
    HealthReport, HealthStatus, PredictionRequest, PredictionResponse, RequestStage, ZipCode,
};
pub use regressor_spi::FeatureImportance;
