//! Anomaly Detection API
//!
//! Configuration types and builders for anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{AnomalyAssessment, AnomalyError, AnomalyResult, Result};

// ============================================================================
// Detector Configuration
// ============================================================================

/// Isolation forest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolationForestConfig {
    /// Number of isolation trees (default: 100).
    pub n_trees: usize,
    /// Rows sampled per tree, capped at the training size (default: 256).
    pub max_samples: usize,
    /// Expected share of anomalies in the training data (default: 0.01).
    pub contamination: f64,
    /// Seed for subsampling and split selection (default: 42).
    pub seed: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_samples: 256,
            contamination: 0.01,
            seed: 42,
        }
    }
}

impl IsolationForestConfig {
    pub fn new(contamination: f64) -> Self {
        Self {
            contamination,
            ..Self::default()
        }
    }

    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(AnomalyError::invalid_parameter("n_trees", "must be at least 1"));
        }
        if self.max_samples < 2 {
            return Err(AnomalyError::invalid_parameter(
                "max_samples",
                "must be at least 2",
            ));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(AnomalyError::invalid_parameter(
                "contamination",
                "must be in (0, 0.5]",
            ));
        }
        Ok(())
    }
}
