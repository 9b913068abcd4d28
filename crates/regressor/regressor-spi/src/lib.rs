//! Regressor Service Provider Interface
//!
//! Defines the fit/predict contract for tabular regression models together
//! with their error and result types.

pub mod contract;
pub mod error;
pub mod model;

pub use contract::Regressor;
pub use error::{RegressorError, Result};
pub use model::{EvaluationMetrics, FeatureImportance, TrainingReport};
