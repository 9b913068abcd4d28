//! Anomaly detector trait definition.

use crate::error::Result;
use crate::model::{AnomalyAssessment, AnomalyResult};

/// Anomaly detector trait.
///
/// Implementations learn the distribution of multi-dimensional feature
/// vectors and score how far a sample deviates from it. Higher scores are
/// more anomalous.
pub trait AnomalyDetector: Send + Sync {
    /// Fit the detector to training rows.
    fn fit(&mut self, data: &[Vec<f64>]) -> Result<()>;

    /// Anomaly score of a single sample.
    fn score(&self, sample: &[f64]) -> Result<f64>;

    /// Score above which a sample is anomalous.
    fn threshold(&self) -> Result<f64>;

    /// Check if detector has been fitted.
    fn is_fitted(&self) -> bool;

    /// Whether a sample is anomalous.
    fn is_anomalous(&self, sample: &[f64]) -> Result<bool> {
        Ok(self.score(sample)? > self.threshold()?)
    }

    /// Score and flag a single sample.
    fn assess(&self, sample: &[f64]) -> Result<AnomalyAssessment> {
        Ok(AnomalyAssessment::new(self.score(sample)?, self.threshold()?))
    }

    /// Score and flag a batch of rows.
    fn detect(&self, data: &[Vec<f64>]) -> Result<AnomalyResult> {
        let threshold = self.threshold()?;
        let scores = data
            .iter()
            .map(|row| self.score(row))
            .collect::<Result<Vec<f64>>>()?;
        let is_anomaly = scores.iter().map(|&s| s > threshold).collect();
        Ok(AnomalyResult::new(is_anomaly, scores, threshold))
    }
}
