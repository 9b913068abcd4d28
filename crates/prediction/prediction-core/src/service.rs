//! The artifact-backed prediction service.

use std::path::Path;
use std::sync::Arc;

use anomaly_core::AnomalyDetector;
use artifact::{ArtifactLoadError, ModelArtifact};
use features_spi::{FeatureError, Featurizer};
use prediction_spi::{
    DeliveryPredictor, HealthReport, PredictionError, PredictionRequest, PredictionResponse,
    RequestStage, Result, ValidationError,
};
use regressor_core::Regressor;
use regressor_spi::FeatureImportance;
use tracing::debug;

use crate::validate::validate;
use crate::warnings;

/// Serves predictions from one immutable model artifact.
///
/// Cloning is cheap: clones share the same artifact. A service built with
/// [`PredictionService::unloaded`] reports `not_ready` and rejects every
/// prediction with [`PredictionError::NotReady`].
#[derive(Debug, Clone, Default)]
pub struct PredictionService {
    artifact: Option<Arc<ModelArtifact>>,
}

impl PredictionService {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self {
            artifact: Some(artifact),
        }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self::new(Arc::new(artifact))
    }

    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Load the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactLoadError> {
        ModelArtifact::load(path).map(Self::from_artifact)
    }

    pub fn artifact(&self) -> Option<&ModelArtifact> {
        self.artifact.as_deref()
    }
}

impl DeliveryPredictor for PredictionService {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let artifact = self.artifact().ok_or(PredictionError::NotReady)?;

        let input = validate(request)?;
        debug!(stage = %RequestStage::Validated, route = ?input.route, "request validated");

        let featurized = artifact.features.featurize(&input).map_err(featurize_error)?;
        let row = featurized.vector.to_vec();
        debug!(stage = %RequestStage::Featurized, notes = featurized.notes.len(), "request featurized");

        let assessment = artifact
            .anomaly
            .assess(&row)
            .map_err(|e| PredictionError::internal(RequestStage::Featurized, e.to_string()))?;
        let predicted_days = artifact
            .regressor
            .predict_one(&row)
            .map_err(|e| PredictionError::internal(RequestStage::Featurized, e.to_string()))?;
        debug!(
            stage = %RequestStage::Scored,
            predicted_days,
            anomaly_score = assessment.score,
            "request scored"
        );

        let mut warnings = Vec::new();
        if assessment.is_anomalous {
            warnings.push(warnings::anomaly(&assessment));
        }
        warnings.extend(
            artifact
                .ranges
                .check(&featurized.vector)
                .iter()
                .map(warnings::out_of_range),
        );
        warnings.extend(featurized.notes.iter().map(warnings::unknown_category));

        Ok(PredictionResponse {
            predicted_days,
            mae: artifact.metrics.mae,
            r2_score: artifact.metrics.r2_score,
            warnings,
        })
    }

    fn health(&self) -> HealthReport {
        match self.artifact() {
            Some(artifact) => HealthReport::ready(
                artifact.summary.training_records,
                artifact.metrics.mae,
                artifact.metrics.r2_score,
            ),
            None => HealthReport::not_ready(),
        }
    }

    fn feature_importance(&self) -> Result<Vec<FeatureImportance>> {
        let artifact = self.artifact().ok_or(PredictionError::NotReady)?;
        artifact
            .feature_importance()
            .map_err(|e| PredictionError::internal(RequestStage::Received, e.to_string()))
    }

    fn is_ready(&self) -> bool {
        self.artifact.is_some()
    }
}

fn featurize_error(error: FeatureError) -> PredictionError {
    match error {
        FeatureError::MissingLocation { role, zip_prefix } => {
            PredictionError::MissingLocation { role, zip_prefix }
        }
        FeatureError::InvalidValue { field, reason } => {
            PredictionError::Validation(ValidationError::single(field, reason))
        }
        other => PredictionError::internal(RequestStage::Validated, other.to_string()),
    }
}
