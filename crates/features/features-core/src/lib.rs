//! Feature Engineering Core
//!
//! Implementations that turn order records and request payloads into
//! [`FeatureVector`](features_spi::FeatureVector)s:
//!
//! - [`haversine_km`]: great-circle distance between zip centroids
//! - [`parse_timestamp`] / [`calendar_of`]: calendar features
//! - [`GeoIndex`]: zip prefix to centroid lookup
//! - [`CategoryEncoder`]: frozen categorical encoding with an unknown bucket
//! - [`RegionalDeliveryStats`]: leakage-free regional delivery aggregates
//! - [`FeatureRanges`]: training ranges for out-of-distribution checks
//! - [`FeatureEngineer`]: the fitted transform persisted with a model

mod calendar;
mod distance;
mod encoder;
mod engineer;
mod geo_index;
mod ranges;
mod regional;

pub use calendar::{calendar_of, parse_optional_timestamp, parse_timestamp};
pub use distance::haversine_km;
pub use encoder::{normalize_category, CategoryEncoder, Encoded, UNKNOWN_CODE};
pub use engineer::{ExclusionReport, FeatureEngineer, FittedFeatures, TrainingSet};
pub use geo_index::{GeoIndex, GeoIndexBuilder};
pub use ranges::{quantile, FeatureRanges, RangeViolation};
pub use regional::{prior_region_means, DeliveryEvent, RegionalDeliveryStats};

// Re-export from SPI
pub use features_spi::{FeatureError, Featurizer, Result};
