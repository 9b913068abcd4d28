//! Historical order record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geo::ZipPrefix;

/// One delivered order item as loaded from the historical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub purchased_at: NaiveDateTime,
    pub approved_at: Option<NaiveDateTime>,
    pub estimated_delivery_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub price: f64,
    pub freight_value: f64,
    pub product_category: Option<String>,
    pub product_weight_g: Option<f64>,
    pub product_vol_cm3: f64,
    pub customer_zip_prefix: ZipPrefix,
    pub customer_state: String,
    pub seller_zip_prefix: ZipPrefix,
    pub seller_state: String,
}

impl OrderRecord {
    /// Whole days from purchase to delivery, `None` when not delivered.
    ///
    /// May be negative for corrupt rows; callers decide how to treat those.
    pub fn delivery_days(&self) -> Option<i64> {
        self.delivered_at
            .map(|delivered| (delivered - self.purchased_at).num_days())
    }
}
