//! Batch scoring result.

use serde::{Deserialize, Serialize};

/// Scores and flags for a batch of rows, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub is_anomaly: Vec<bool>,
    pub scores: Vec<f64>,
    /// Threshold the flags were derived from.
    pub threshold: f64,
}

impl AnomalyResult {
    pub fn new(is_anomaly: Vec<bool>, scores: Vec<f64>, threshold: f64) -> Self {
        Self {
            is_anomaly,
            scores,
            threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.is_anomaly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_anomaly.is_empty()
    }

    /// Rows flagged as anomalous.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.indices_where(true)
    }

    /// Rows not flagged.
    pub fn clean_indices(&self) -> Vec<usize> {
        self.indices_where(false)
    }

    pub fn anomaly_count(&self) -> usize {
        self.is_anomaly.iter().filter(|&&flag| flag).count()
    }

    /// Share of flagged rows, 0 for an empty batch.
    pub fn anomaly_rate(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.anomaly_count() as f64 / self.len() as f64
        }
    }

    fn indices_where(&self, flagged: bool) -> Vec<usize> {
        self.is_anomaly
            .iter()
            .enumerate()
            .filter_map(|(i, &flag)| (flag == flagged).then_some(i))
            .collect()
    }
}
