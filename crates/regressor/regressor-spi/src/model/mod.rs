//! Data models for regression.

mod importance;
mod metrics;
mod training_report;

pub use importance::FeatureImportance;
pub use metrics::EvaluationMetrics;
pub use training_report::TrainingReport;
