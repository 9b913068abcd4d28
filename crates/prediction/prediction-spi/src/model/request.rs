//! Prediction request payload.

use serde::{Deserialize, Serialize};

/// Zip prefix as sent by clients, either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZipCode {
    Number(u64),
    Text(String),
}

impl ZipCode {
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for ZipCode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u32> for ZipCode {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

/// An order to estimate, without its delivery outcome.
///
/// The purchase date is given either as `purchase_timestamp` or as
/// `purchase_month` plus `purchase_day_of_week` (0 = Monday). The route is
/// given either as both zip prefixes or as `distance_km`. The four numeric
/// product fields are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub purchase_timestamp: Option<String>,
    #[serde(default)]
    pub purchase_month: Option<i64>,
    #[serde(default)]
    pub purchase_day_of_week: Option<i64>,
    #[serde(default)]
    pub customer_zip_prefix: Option<ZipCode>,
    #[serde(default)]
    pub seller_zip_prefix: Option<ZipCode>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub customer_state: Option<String>,
    #[serde(default)]
    pub seller_state: Option<String>,
    #[serde(default)]
    pub product_category: Option<String>,
    pub price: f64,
    pub freight_value: f64,
    pub product_weight_g: f64,
    pub product_vol_cm3: f64,
}
