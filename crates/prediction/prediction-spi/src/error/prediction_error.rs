//! Prediction service error types.

use features_spi::{LocationRole, ZipPrefix};
use thiserror::Error;

use super::validation_error::ValidationError;
use crate::model::RequestStage;

/// Per-request prediction failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Invalid request: {0}")]
    Validation(ValidationError),

    #[error("No known centroid for {role} zip prefix {zip_prefix}")]
    MissingLocation { role: LocationRole, zip_prefix: ZipPrefix },

    #[error("No model loaded")]
    NotReady,

    #[error("Prediction failed after {stage}: {message}")]
    Internal { stage: RequestStage, message: String },
}

impl PredictionError {
    pub fn internal(stage: RequestStage, message: impl Into<String>) -> Self {
        Self::Internal {
            stage,
            message: message.into(),
        }
    }

    /// Last stage the request reached before failing.
    pub fn stage(&self) -> RequestStage {
        match self {
            Self::Validation(_) | Self::NotReady => RequestStage::Received,
            Self::MissingLocation { .. } => RequestStage::Validated,
            Self::Internal { stage, .. } => *stage,
        }
    }

    /// Stable machine-readable name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::MissingLocation { .. } => "missing_location",
            Self::NotReady => "not_ready",
            Self::Internal { .. } => "internal",
        }
    }

    /// Whether the caller can fix the error by changing the request.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingLocation { .. })
    }
}

impl From<ValidationError> for PredictionError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

/// Result type for prediction operations.
pub type Result<T> = std::result::Result<T, PredictionError>;
