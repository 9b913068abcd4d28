//! Training ranges of continuous features.

use features_spi::{FeatureKind, FeatureSchema, FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Linear-interpolated quantile of already sorted values.
///
/// Returns NaN for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// A continuous feature value outside its training range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeViolation {
    pub feature: String,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Lower/upper training quantiles for every continuous feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRanges {
    schema: FeatureSchema,
    /// `None` for non-continuous columns.
    bounds: Vec<Option<(f64, f64)>>,
}

impl FeatureRanges {
    pub fn fit(vectors: &[FeatureVector], lower_q: f64, upper_q: f64) -> Self {
        let schema = FeatureSchema::current();
        let rows: Vec<[f64; FEATURE_COUNT]> = vectors.iter().map(FeatureVector::to_array).collect();

        let bounds = schema
            .kinds
            .iter()
            .enumerate()
            .map(|(j, kind)| {
                if *kind != FeatureKind::Continuous || rows.is_empty() {
                    return None;
                }
                let mut column: Vec<f64> = rows.iter().map(|r| r[j]).collect();
                column.sort_by(f64::total_cmp);
                Some((quantile(&column, lower_q), quantile(&column, upper_q)))
            })
            .collect();

        Self { schema, bounds }
    }

    pub fn bounds(&self, feature: &str) -> Option<(f64, f64)> {
        self.schema
            .index_of(feature)
            .and_then(|i| self.bounds.get(i).copied().flatten())
    }

    /// Violations in schema order.
    pub fn check(&self, vector: &FeatureVector) -> Vec<RangeViolation> {
        vector
            .to_array()
            .iter()
            .zip(&self.bounds)
            .zip(&self.schema.names)
            .filter_map(|((&value, bounds), name)| {
                let (lower, upper) = (*bounds)?;
                (value < lower || value > upper).then(|| RangeViolation {
                    feature: name.clone(),
                    value,
                    lower,
                    upper,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(distance_km: f64, price: f64) -> FeatureVector {
        FeatureVector {
            distance_km,
            purchase_month: 5,
            purchase_dow: 1,
            is_weekend_order: false,
            customer_region_code: 1,
            seller_region_code: 1,
            same_region: true,
            region_mean_delivery_days: 10.0,
            price,
            freight_value: 15.0,
            product_weight_g: 500.0,
            product_vol_cm3: 2000.0,
            product_category_code: 1,
        }
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 5.0);
        assert_eq!(quantile(&sorted, 0.5), 3.0);
        assert!((quantile(&sorted, 0.1) - 1.4).abs() < 1e-12);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_fit_only_bounds_continuous_features() {
        let vectors: Vec<_> = (0..=100).map(|i| vector(i as f64 * 10.0, 50.0)).collect();
        let ranges = FeatureRanges::fit(&vectors, 0.01, 0.99);
        let (lo, hi) = ranges.bounds("distance_km").unwrap();
        assert!((lo - 10.0).abs() < 1e-9);
        assert!((hi - 990.0).abs() < 1e-9);
        assert!(ranges.bounds("purchase_month").is_none());
        assert!(ranges.bounds("customer_region_code").is_none());
    }

    #[test]
    fn test_check_reports_violations_in_schema_order() {
        let vectors: Vec<_> = (0..=100).map(|i| vector(i as f64 * 10.0, 40.0 + i as f64)).collect();
        let ranges = FeatureRanges::fit(&vectors, 0.01, 0.99);

        let violations = ranges.check(&vector(5000.0, 1000.0));
        let names: Vec<_> = violations.iter().map(|v| v.feature.as_str()).collect();
        assert_eq!(names, vec!["distance_km", "price"]);
        assert_eq!(violations[0].value, 5000.0);

        assert!(ranges.check(&vector(500.0, 90.0)).is_empty());
    }

    #[test]
    fn test_empty_fit_never_flags() {
        let ranges = FeatureRanges::fit(&[], 0.01, 0.99);
        assert!(ranges.check(&vector(1e9, 1e9)).is_empty());
    }
}
