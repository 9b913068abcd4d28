//! Feature Engineering Facade
//!
//! Unified re-exports for the feature engineering module:
//! - Order, location and feature-vector models plus `Featurizer` from SPI
//! - `FeatureConfig` from API
//! - `FeatureEngineer`, `GeoIndex`, encoders and aggregates from Core

// Re-export everything from SPI
pub use features_spi::*;

// Re-export everything from API
pub use features_api::*;

// Re-export everything from Core
pub use features_core::*;
