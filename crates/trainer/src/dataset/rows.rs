//! Typed rows of the Olist CSV files, deserialized by header name.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct OrderRow {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: String,
    pub order_purchase_timestamp: String,
    #[serde(default)]
    pub order_approved_at: String,
    #[serde(default)]
    pub order_delivered_customer_date: String,
    #[serde(default)]
    pub order_estimated_delivery_date: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemRow {
    pub order_id: String,
    pub product_id: String,
    pub seller_id: String,
    pub price: f64,
    pub freight_value: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductRow {
    pub product_id: String,
    pub product_category_name: Option<String>,
    pub product_weight_g: Option<f64>,
    pub product_length_cm: Option<f64>,
    pub product_height_cm: Option<f64>,
    pub product_width_cm: Option<f64>,
}

impl ProductRow {
    /// Missing dimensions count as 0.
    pub fn volume_cm3(&self) -> f64 {
        self.product_length_cm.unwrap_or(0.0)
            * self.product_height_cm.unwrap_or(0.0)
            * self.product_width_cm.unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CustomerRow {
    pub customer_id: String,
    pub customer_zip_code_prefix: String,
    pub customer_state: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SellerRow {
    pub seller_id: String,
    pub seller_zip_code_prefix: String,
    pub seller_state: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeolocationRow {
    pub geolocation_zip_code_prefix: String,
    pub geolocation_lat: f64,
    pub geolocation_lng: f64,
    #[serde(default)]
    pub geolocation_state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_treats_missing_dimensions_as_zero() {
        let mut product = ProductRow {
            product_id: "p".to_string(),
            product_category_name: None,
            product_weight_g: Some(100.0),
            product_length_cm: Some(10.0),
            product_height_cm: Some(5.0),
            product_width_cm: Some(2.0),
        };
        assert_eq!(product.volume_cm3(), 100.0);
        product.product_height_cm = None;
        assert_eq!(product.volume_cm3(), 0.0);
    }
}
