//! Artifact contents.

use anomaly_core::IsolationForest;
use chrono::{DateTime, Utc};
use features_core::{ExclusionReport, FeatureEngineer, FeatureRanges};
use features_spi::FeatureSchema;
use regressor_core::{GradientBoostingRegressor, Regressor};
use regressor_spi::{EvaluationMetrics, FeatureImportance, Result};
use serde::{Deserialize, Serialize};

/// Artifact file format understood by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Counts describing the training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Order records read from the dataset.
    pub total_records: usize,
    /// Records that survived exclusion and were featurized.
    pub training_records: usize,
    /// Featurized records flagged by the anomaly scorer.
    pub anomalies_flagged: usize,
    /// Records the final regressor was fitted on.
    pub regressor_records: usize,
    pub exclusions: ExclusionReport,
    pub trained_at: DateTime<Utc>,
}

/// Everything needed to serve predictions, frozen at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub schema: FeatureSchema,
    pub features: FeatureEngineer,
    pub anomaly: IsolationForest,
    pub regressor: GradientBoostingRegressor,
    pub ranges: FeatureRanges,
    pub metrics: EvaluationMetrics,
    pub summary: TrainingSummary,
}

impl ModelArtifact {
    pub fn new(
        features: FeatureEngineer,
        anomaly: IsolationForest,
        regressor: GradientBoostingRegressor,
        ranges: FeatureRanges,
        metrics: EvaluationMetrics,
        summary: TrainingSummary,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            schema: FeatureSchema::current(),
            features,
            anomaly,
            regressor,
            ranges,
            metrics,
            summary,
        }
    }

    /// Regressor importances paired with schema names, most important first.
    pub fn feature_importance(&self) -> Result<Vec<FeatureImportance>> {
        let importances = self.regressor.feature_importance()?;
        Ok(FeatureImportance::ranking(&self.schema.names, &importances))
    }
}
