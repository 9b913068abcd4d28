//! Training pipeline errors.

use std::path::PathBuf;

use anomaly_facade::AnomalyError;
use features_facade::FeatureError;
use regressor_facade::RegressorError;
use thiserror::Error;

/// Errors raised while loading training data or fitting models.
#[derive(Debug, Error)]
pub enum TrainingDataError {
    #[error("Missing dataset file: {path}")]
    MissingFile { path: PathBuf },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {file} at line {line}: {message}")]
    Csv {
        file: String,
        line: u64,
        message: String,
    },

    #[error("Malformed timestamp '{value}' in {file} at line {line}")]
    MalformedTimestamp {
        file: String,
        line: u64,
        value: String,
    },

    #[error("Malformed {field} '{value}' in {file} at line {line}")]
    MalformedField {
        file: String,
        line: u64,
        field: String,
        value: String,
    },

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Invalid training configuration: {0}")]
    Config(String),

    #[error("Feature engineering failed: {0}")]
    Features(#[from] FeatureError),

    #[error("Anomaly scorer failed: {0}")]
    Anomaly(#[from] AnomalyError),

    #[error("Regressor failed: {0}")]
    Regressor(#[from] RegressorError),
}

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, TrainingDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_timestamp_display() {
        let error = TrainingDataError::MalformedTimestamp {
            file: "olist_orders_dataset.csv".to_string(),
            line: 42,
            value: "2017-13-45".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed timestamp '2017-13-45' in olist_orders_dataset.csv at line 42"
        );
    }

    #[test]
    fn test_wrapped_regressor_error() {
        let error: TrainingDataError = RegressorError::NotFitted.into();
        assert!(matches!(error, TrainingDataError::Regressor(_)));
        assert!(error.to_string().starts_with("Regressor failed"));
    }
}
