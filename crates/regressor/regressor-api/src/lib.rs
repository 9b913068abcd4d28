//! Regressor API
//!
//! Configuration types for gradient boosting and model evaluation.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use regressor_spi::{EvaluationMetrics, FeatureImportance, RegressorError, Result, TrainingReport};

// ============================================================================
// Gradient Boosting Configuration
// ============================================================================

/// Histogram gradient boosting configuration (squared-error loss).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientBoostingConfig {
    /// Maximum boosting rounds (default: 1000).
    pub n_estimators: usize,
    /// Shrinkage applied to each tree (default: 0.05).
    pub learning_rate: f64,
    /// Maximum tree depth (default: 6).
    pub max_depth: usize,
    /// Minimum hessian sum per child (default: 1.0).
    pub min_child_weight: f64,
    /// L2 regularization on leaf weights (default: 1.0).
    pub lambda: f64,
    /// Minimum gain to make a split (default: 0.0).
    pub gamma: f64,
    /// Maximum histogram bins per feature (default: 256).
    pub max_bins: usize,
    /// Stop after this many rounds without evaluation improvement (default: 50).
    pub early_stopping_rounds: Option<usize>,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 1000,
            learning_rate: 0.05,
            max_depth: 6,
            min_child_weight: 1.0,
            lambda: 1.0,
            gamma: 0.0,
            max_bins: 256,
            early_stopping_rounds: Some(50),
        }
    }
}

impl GradientBoostingConfig {
    pub fn new(n_estimators: usize, learning_rate: f64) -> Self {
        Self {
            n_estimators,
            learning_rate,
            ..Self::default()
        }
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = max_bins;
        self
    }

    pub fn with_regularization(mut self, lambda: f64, gamma: f64) -> Self {
        self.lambda = lambda;
        self.gamma = gamma;
        self
    }

    pub fn with_min_child_weight(mut self, min_child_weight: f64) -> Self {
        self.min_child_weight = min_child_weight;
        self
    }

    pub fn with_early_stopping(mut self, rounds: Option<usize>) -> Self {
        self.early_stopping_rounds = rounds;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(RegressorError::invalid_parameter(
                "n_estimators",
                "must be at least 1",
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(RegressorError::invalid_parameter(
                "learning_rate",
                "must be in (0, 1]",
            ));
        }
        if self.max_depth == 0 {
            return Err(RegressorError::invalid_parameter("max_depth", "must be at least 1"));
        }
        if !(2..=u16::MAX as usize).contains(&self.max_bins) {
            return Err(RegressorError::invalid_parameter(
                "max_bins",
                "must be in [2, 65535]",
            ));
        }
        for (name, value) in [
            ("min_child_weight", self.min_child_weight),
            ("lambda", self.lambda),
            ("gamma", self.gamma),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RegressorError::invalid_parameter(
                    name,
                    "must be finite and non-negative",
                ));
            }
        }
        if self.early_stopping_rounds == Some(0) {
            return Err(RegressorError::invalid_parameter(
                "early_stopping_rounds",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Evaluation Configuration
// ============================================================================

/// How rows are divided into train and held-out sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Most recent purchases are held out.
    #[default]
    Chronological,
    /// Seeded random permutation.
    Shuffled,
}

/// Held-out evaluation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Share of rows held out (default: 0.2).
    pub test_fraction: f64,
    pub split: SplitStrategy,
    /// Seed for the shuffled split (default: 42).
    pub seed: u64,
    /// Absolute error in days counted as a business hit (default: 3.0).
    pub tolerance_days: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            split: SplitStrategy::Chronological,
            seed: 42,
            tolerance_days: 3.0,
        }
    }
}

impl EvaluationConfig {
    pub fn new(test_fraction: f64) -> Self {
        Self {
            test_fraction,
            ..Self::default()
        }
    }

    pub fn with_split(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tolerance_days(mut self, tolerance_days: f64) -> Self {
        self.tolerance_days = tolerance_days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(RegressorError::invalid_parameter(
                "test_fraction",
                "must be in (0, 1)",
            ));
        }
        if !(self.tolerance_days.is_finite() && self.tolerance_days > 0.0) {
            return Err(RegressorError::invalid_parameter(
                "tolerance_days",
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}
