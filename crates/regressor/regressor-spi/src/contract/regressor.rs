//! Regressor trait definition.

use crate::error::Result;
use crate::model::TrainingReport;

/// Common trait for tabular regression models.
///
/// Follows the fit-predict pattern: rows are feature vectors of equal
/// length, targets are non-negative durations.
///
/// # Example
///
/// ```rust,ignore
/// use regressor_spi::Regressor;
///
/// fn fit_and_score<R: Regressor>(model: &mut R, x: &[Vec<f64>], y: &[f64]) -> regressor_spi::Result<Vec<f64>> {
///     model.fit(x, y)?;
///     model.predict(x)
/// }
/// ```
pub trait Regressor: Send + Sync {
    /// Fit the model on all rows.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<TrainingReport>;

    /// Fit with early stopping on a held-out evaluation set.
    ///
    /// Only the rounds up to the best evaluation iteration are kept.
    fn fit_with_eval(
        &mut self,
        features: &[Vec<f64>],
        targets: &[f64],
        eval_features: &[Vec<f64>],
        eval_targets: &[f64],
    ) -> Result<TrainingReport>;

    /// Predict a single row. Never negative.
    fn predict_one(&self, row: &[f64]) -> Result<f64>;

    /// Predict a batch of rows.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;

    /// Per-feature importance in input column order, summing to 1 unless
    /// the model never split.
    fn feature_importance(&self) -> Result<Vec<f64>>;
}
