//! Regressor error types.

use thiserror::Error;

/// Regression model errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressorError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Model not fitted: call fit() before predict()")]
    NotFitted,

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid target at row {index}: {value} (must be finite and non-negative)")]
    InvalidTarget { index: usize, value: f64 },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

impl RegressorError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for regressor operations.
pub type Result<T> = std::result::Result<T, RegressorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let error = RegressorError::InsufficientData {
            required: 2,
            got: 0,
        };
        assert_eq!(error.to_string(), "Insufficient data: required 2, got 0");
    }

    #[test]
    fn test_not_fitted_display() {
        assert_eq!(
            RegressorError::NotFitted.to_string(),
            "Model not fitted: call fit() before predict()"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = RegressorError::invalid_parameter("learning_rate", "must be in (0, 1]");
        assert_eq!(
            error.to_string(),
            "Invalid parameter: learning_rate - must be in (0, 1]"
        );
    }

    #[test]
    fn test_invalid_target_display() {
        let error = RegressorError::InvalidTarget {
            index: 7,
            value: -2.0,
        };
        assert_eq!(
            error.to_string(),
            "Invalid target at row 7: -2 (must be finite and non-negative)"
        );
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let error = RegressorError::DimensionMismatch {
            expected: 13,
            got: 4,
        };
        assert_eq!(error.to_string(), "Dimension mismatch: expected 13, got 4");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(RegressorError::NotFitted);
        assert!(!error.to_string().is_empty());
    }
}
