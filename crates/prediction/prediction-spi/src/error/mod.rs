//! Error types for the prediction service.

mod prediction_error;
mod validation_error;

pub use prediction_error::{PredictionError, Result};
pub use validation_error::{FieldViolation, ValidationError};
