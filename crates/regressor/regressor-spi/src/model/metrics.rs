//! Held-out evaluation metrics.

use serde::{Deserialize, Serialize};

/// Accuracy of a model on held-out rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean absolute error in days.
    pub mae: f64,
    /// Root mean squared error in days.
    pub rmse: f64,
    /// Coefficient of determination.
    pub r2_score: f64,
    /// Share of rows predicted within the business tolerance.
    pub business_accuracy: f64,
    /// Number of held-out rows.
    pub test_records: usize,
    /// Boosting round with the lowest held-out error, if early stopping ran.
    pub best_iteration: Option<usize>,
}
