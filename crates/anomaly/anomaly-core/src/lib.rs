//! Anomaly Detection Core
//!
//! Isolation forest scoring of feature vectors, with the per-feature
//! standardization it is trained on.

pub mod isolation_forest;
pub mod scaler;

pub use isolation_forest::{average_path_length, IsolationForest, IsolationTree};
pub use scaler::StandardScaler;

// Re-export SPI and API types for convenience
pub use anomaly_api::IsolationForestConfig;
pub use anomaly_spi::{AnomalyAssessment, AnomalyDetector, AnomalyError, AnomalyResult, Result};
