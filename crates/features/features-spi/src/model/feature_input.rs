//! Inference-side featurization input and output.

use serde::{Deserialize, Serialize};

use super::feature_vector::FeatureVector;
use super::geo::ZipPrefix;

/// How the shipment route is described.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteInput {
    /// Resolve both ends through the centroid table.
    ZipPrefixes {
        customer: ZipPrefix,
        seller: ZipPrefix,
    },
    /// Precomputed great-circle distance.
    Distance { km: f64 },
}

/// Calendar position of the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInput {
    /// 1..=12
    pub month: u32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
}

/// Validated request payload handed to a featurizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInput {
    pub route: RouteInput,
    pub calendar: CalendarInput,
    pub customer_state: Option<String>,
    pub seller_state: Option<String>,
    pub product_category: Option<String>,
    pub price: f64,
    pub freight_value: f64,
    pub product_weight_g: f64,
    pub product_vol_cm3: f64,
}

/// A categorical value that fell into the unknown bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingNote {
    pub field: String,
    /// `None` when the value was absent altogether.
    pub value: Option<String>,
}

impl EncodingNote {
    pub fn new(field: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            field: field.into(),
            value: value.map(str::to_string),
        }
    }
}

/// Output of [`crate::Featurizer::featurize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Featurized {
    pub vector: FeatureVector,
    pub notes: Vec<EncodingNote>,
}
