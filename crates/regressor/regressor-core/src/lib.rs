//! Regressor Core
//!
//! Histogram gradient-boosted regression trees plus the metrics and data
//! splits used to evaluate them.

pub mod binning;
pub mod boosting;
pub mod metrics;
pub mod split;
pub mod tree;

pub use binning::FeatureBinner;
pub use boosting::GradientBoostingRegressor;
pub use metrics::{evaluate, mae, mse, r_squared, rmse, within_tolerance};
pub use split::{chronological_split, shuffled_split, test_size};
pub use tree::RegressionTree;

// Re-export SPI and API types for convenience
pub use regressor_api::{EvaluationConfig, GradientBoostingConfig, SplitStrategy};
pub use regressor_spi::{
    EvaluationMetrics, FeatureImportance, Regressor, RegressorError, Result, TrainingReport,
};
