//! Training configuration.

use std::fs;
use std::path::Path;

use anomaly_facade::IsolationForestConfig;
use features_facade::FeatureConfig;
use regressor_facade::{EvaluationConfig, GradientBoostingConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainingDataError};

/// Everything the training job can be tuned with.
///
/// Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub features: FeatureConfig,
    pub anomaly: IsolationForestConfig,
    pub boosting: GradientBoostingConfig,
    pub evaluation: EvaluationConfig,
    /// Drop rows flagged by the anomaly scorer before fitting the regressor
    /// (default: true).
    pub exclude_anomalies: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            features: FeatureConfig::default(),
            anomaly: IsolationForestConfig::default(),
            boosting: GradientBoostingConfig::default(),
            evaluation: EvaluationConfig::default(),
            exclude_anomalies: true,
        }
    }
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TrainingDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| TrainingDataError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    pub fn with_anomaly(mut self, anomaly: IsolationForestConfig) -> Self {
        self.anomaly = anomaly;
        self
    }

    pub fn with_boosting(mut self, boosting: GradientBoostingConfig) -> Self {
        self.boosting = boosting;
        self
    }

    pub fn with_evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_exclude_anomalies(mut self, exclude: bool) -> Self {
        self.exclude_anomalies = exclude;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.anomaly.validate()?;
        self.boosting.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}
