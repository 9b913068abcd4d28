//! Feature engineering error types.

use thiserror::Error;

use crate::model::{LocationRole, ZipPrefix};

/// Feature engineering errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("No known centroid for {role} zip prefix {zip_prefix}")]
    MissingLocation { role: LocationRole, zip_prefix: ZipPrefix },

    #[error("Malformed timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("No usable training records: {0}")]
    EmptyTrainingSet(String),
}

impl FeatureError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can fix the error by changing the input.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::EmptyTrainingSet(_))
    }
}

/// Result type for feature engineering operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
