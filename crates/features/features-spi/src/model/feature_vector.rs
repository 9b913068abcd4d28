//! Feature vector and its persisted schema.

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 13;

/// Bumped whenever the names, kinds or order below change.
pub const SCHEMA_VERSION: u32 = 1;

/// Column names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "distance_km",
    "purchase_month",
    "purchase_dow",
    "is_weekend_order",
    "customer_region_code",
    "seller_region_code",
    "same_region",
    "region_mean_delivery_days",
    "price",
    "freight_value",
    "product_weight_g",
    "product_vol_cm3",
    "product_category_code",
];

/// Column kinds in model input order.
pub const FEATURE_KINDS: [FeatureKind; FEATURE_COUNT] = [
    FeatureKind::Continuous,
    FeatureKind::Calendar,
    FeatureKind::Calendar,
    FeatureKind::Flag,
    FeatureKind::Categorical,
    FeatureKind::Categorical,
    FeatureKind::Flag,
    FeatureKind::Aggregate,
    FeatureKind::Continuous,
    FeatureKind::Continuous,
    FeatureKind::Continuous,
    FeatureKind::Continuous,
    FeatureKind::Categorical,
];

/// Kind of a feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Continuous,
    Calendar,
    Categorical,
    Flag,
    Aggregate,
}

/// Ordered feature names and kinds, persisted with every trained artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub names: Vec<String>,
    pub kinds: Vec<FeatureKind>,
}

impl FeatureSchema {
    /// Schema produced by this build.
    pub fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            kinds: FEATURE_KINDS.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::current()
    }
}

/// Flat numeric record consumed by the anomaly scorer and the regressor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub distance_km: f64,
    pub purchase_month: u32,
    /// 0 = Monday .. 6 = Sunday.
    pub purchase_dow: u32,
    pub is_weekend_order: bool,
    pub customer_region_code: u32,
    pub seller_region_code: u32,
    pub same_region: bool,
    pub region_mean_delivery_days: f64,
    pub price: f64,
    pub freight_value: f64,
    pub product_weight_g: f64,
    pub product_vol_cm3: f64,
    pub product_category_code: u32,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.distance_km,
            f64::from(self.purchase_month),
            f64::from(self.purchase_dow),
            flag(self.is_weekend_order),
            f64::from(self.customer_region_code),
            f64::from(self.seller_region_code),
            flag(self.same_region),
            self.region_mean_delivery_days,
            self.price,
            self.freight_value,
            self.product_weight_g,
            self.product_vol_cm3,
            f64::from(self.product_category_code),
        ]
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }

    /// Check the domain invariants of the vector.
    pub fn validate(&self) -> Result<()> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(FeatureError::invalid_value(
                "distance_km",
                format!("{} must be finite and non-negative", self.distance_km),
            ));
        }
        if !(1..=12).contains(&self.purchase_month) {
            return Err(FeatureError::invalid_value(
                "purchase_month",
                format!("{} outside [1, 12]", self.purchase_month),
            ));
        }
        if self.purchase_dow > 6 {
            return Err(FeatureError::invalid_value(
                "purchase_dow",
                format!("{} outside [0, 6]", self.purchase_dow),
            ));
        }
        if let Some((i, v)) = self
            .to_array()
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(FeatureError::invalid_value(
                FEATURE_NAMES[i],
                format!("{} is not finite", v),
            ));
        }
        Ok(())
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
