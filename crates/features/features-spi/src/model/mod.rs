//! Data models for feature engineering.

mod feature_input;
mod feature_vector;
mod geo;
mod order_record;

pub use feature_input::{CalendarInput, EncodingNote, FeatureInput, Featurized, RouteInput};
pub use feature_vector::{
    FeatureKind, FeatureSchema, FeatureVector, FEATURE_COUNT, FEATURE_KINDS, FEATURE_NAMES,
    SCHEMA_VERSION,
};
pub use geo::{GeoPoint, LocationRole, ZipCentroid, ZipPrefix};
pub use order_record::OrderRecord;
