//! HTTP error mapping and server startup errors.

use std::net::SocketAddr;

use artifact::ArtifactLoadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prediction_facade::{FieldViolation, PredictionError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Reasons the server cannot start or keep running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid {key} setting '{value}'")]
    Config { key: &'static str, value: String },

    #[error("Failed to load model artifact: {0}")]
    Artifact(#[from] ArtifactLoadError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

/// A prediction failure rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PredictionError);

impl From<PredictionError> for ApiError {
    fn from(error: PredictionError) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PredictionError::Validation(_) | PredictionError::MissingLocation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PredictionError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            PredictionError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(stage = %self.0.stage(), error = %self.0, "request failed");
        } else {
            debug!(stage = %self.0.stage(), error = %self.0, "request rejected");
        }

        let violations = match &self.0 {
            PredictionError::Validation(v) => v.violations.clone(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("error").to_string(),
            kind: self.0.kind(),
            message: self.0.to_string(),
            violations,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prediction_facade::{RequestStage, ValidationError};

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(PredictionError::from(ValidationError::single("price", "must be finite")));
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError(PredictionError::NotReady).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError(PredictionError::internal(RequestStage::Featurized, "boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ServerError::Config {
            key: "PORT",
            value: "eighty".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid PORT setting 'eighty'");
    }
}
