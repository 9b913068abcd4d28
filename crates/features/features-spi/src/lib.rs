//! Feature Engineering Service Provider Interface
//!
//! Defines the order, feature-vector and location models shared by the
//! training pipeline and the prediction service, plus the [`Featurizer`]
//! contract and the [`FeatureError`] type.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Featurizer;
pub use error::{FeatureError, Result};
pub use model::{
    CalendarInput, EncodingNote, FeatureInput, FeatureKind, FeatureSchema, FeatureVector,
    Featurized, GeoPoint, LocationRole, OrderRecord, RouteInput, ZipCentroid, ZipPrefix,
    FEATURE_COUNT, FEATURE_KINDS, FEATURE_NAMES, SCHEMA_VERSION,
};
