//! Outcome of a fit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Boosting rounds kept in the model.
    pub rounds: usize,
    /// Zero-based round with the lowest evaluation RMSE, or the last round
    /// when no evaluation set was given.
    pub best_iteration: usize,
    pub train_rmse: f64,
    pub eval_rmse: Option<f64>,
}
