//! Error types for feature engineering.

mod feature_error;

pub use feature_error::{FeatureError, Result};
