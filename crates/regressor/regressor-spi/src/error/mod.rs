//! Error types for regression models.

mod regressor_error;

pub use regressor_error::{RegressorError, Result};
