//! Feature Engineering API
//!
//! Configuration types for feature engineering.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use features_spi::{FeatureError, FeatureSchema, FeatureVector, Result};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Feature engineering configuration.
///
/// Persisted inside the fitted feature engineer so inference reproduces the
/// exact transform used at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// First day of week (0 = Monday) counted as a weekend order (default: 4, Friday).
    pub weekend_start_dow: u32,
    /// Lower training quantile for out-of-range warnings (default: 0.01).
    pub range_lower_quantile: f64,
    /// Upper training quantile for out-of-range warnings (default: 0.99).
    pub range_upper_quantile: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            weekend_start_dow: 4,
            range_lower_quantile: 0.01,
            range_upper_quantile: 0.99,
        }
    }
}

impl FeatureConfig {
    pub fn new(weekend_start_dow: u32) -> Self {
        Self {
            weekend_start_dow,
            ..Self::default()
        }
    }

    pub fn with_range_quantiles(mut self, lower: f64, upper: f64) -> Self {
        self.range_lower_quantile = lower;
        self.range_upper_quantile = upper;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.weekend_start_dow > 6 {
            return Err(FeatureError::invalid_value(
                "weekend_start_dow",
                "must be in [0, 6]",
            ));
        }
        let ordered = 0.0 <= self.range_lower_quantile
            && self.range_lower_quantile < self.range_upper_quantile
            && self.range_upper_quantile <= 1.0;
        if !ordered {
            return Err(FeatureError::invalid_value(
                "range_quantiles",
                "must satisfy 0 <= lower < upper <= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FeatureConfig::default();
        assert_eq!(config.weekend_start_dow, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_quantiles() {
        let config = FeatureConfig::default().with_range_quantiles(0.9, 0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_weekend_start() {
        assert!(FeatureConfig::new(7).validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: FeatureConfig = serde_json::from_str(r#"{"weekend_start_dow": 5}"#).unwrap();
        assert_eq!(config.weekend_start_dow, 5);
        assert_eq!(config.range_upper_quantile, 0.99);
    }
}
