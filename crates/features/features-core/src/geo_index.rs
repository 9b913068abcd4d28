//! Zip prefix to centroid lookup.

use std::collections::{BTreeMap, HashMap};

use features_spi::{FeatureError, GeoPoint, LocationRole, Result, ZipCentroid, ZipPrefix};
use serde::{Deserialize, Serialize};

use crate::distance::haversine_km;

/// Centroid table keyed by zip prefix.
///
/// Ordered map so the serialized artifact is byte-stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoIndex {
    centroids: BTreeMap<ZipPrefix, ZipCentroid>,
}

impl GeoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GeoIndexBuilder {
        GeoIndexBuilder::default()
    }

    pub fn insert(&mut self, zip: ZipPrefix, centroid: ZipCentroid) {
        self.centroids.insert(zip, centroid);
    }

    pub fn get(&self, zip: ZipPrefix) -> Option<&ZipCentroid> {
        self.centroids.get(&zip)
    }

    /// Look up a centroid, failing with `MissingLocation` when unknown.
    pub fn resolve(&self, role: LocationRole, zip: ZipPrefix) -> Result<&ZipCentroid> {
        self.get(zip).ok_or(FeatureError::MissingLocation {
            role,
            zip_prefix: zip,
        })
    }

    /// Distance between customer and seller centroids.
    pub fn distance_km(&self, customer: ZipPrefix, seller: ZipPrefix) -> Result<f64> {
        let c = self.resolve(LocationRole::Customer, customer)?;
        let s = self.resolve(LocationRole::Seller, seller)?;
        Ok(haversine_km(c.point, s.point))
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

impl FromIterator<(ZipPrefix, ZipCentroid)> for GeoIndex {
    fn from_iter<I: IntoIterator<Item = (ZipPrefix, ZipCentroid)>>(iter: I) -> Self {
        Self {
            centroids: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    lat_sum: f64,
    lng_sum: f64,
    count: usize,
    states: BTreeMap<String, usize>,
}

/// Aggregates raw geolocation rows into a [`GeoIndex`].
///
/// Every prefix gets the mean of its coordinates and its most frequent
/// state (alphabetically first on ties).
#[derive(Debug, Default)]
pub struct GeoIndexBuilder {
    accumulators: HashMap<ZipPrefix, Accumulator>,
    rejected: usize,
}

impl GeoIndexBuilder {
    /// Add one geolocation row. Rows with invalid coordinates are counted
    /// and skipped.
    pub fn add(&mut self, zip: ZipPrefix, lat: f64, lng: f64, state: &str) {
        if GeoPoint::new(lat, lng).is_err() {
            self.rejected += 1;
            return;
        }
        let acc = self.accumulators.entry(zip).or_default();
        acc.lat_sum += lat;
        acc.lng_sum += lng;
        acc.count += 1;
        let state = state.trim().to_uppercase();
        if !state.is_empty() {
            *acc.states.entry(state).or_insert(0) += 1;
        }
    }

    /// Rows skipped because of invalid coordinates.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn build(self) -> GeoIndex {
        self.accumulators
            .into_iter()
            .filter_map(|(zip, acc)| {
                let n = acc.count as f64;
                let point = GeoPoint::new(acc.lat_sum / n, acc.lng_sum / n).ok()?;
                let mut state = String::new();
                let mut best = 0;
                for (candidate, count) in acc.states {
                    if count > best {
                        best = count;
                        state = candidate;
                    }
                }
                Some((zip, ZipCentroid { point, state }))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(v: u32) -> ZipPrefix {
        ZipPrefix::new(v).unwrap()
    }

    #[test]
    fn test_builder_averages_coordinates() {
        let mut builder = GeoIndex::builder();
        builder.add(zip(1037), -23.0, -46.0, "sp");
        builder.add(zip(1037), -24.0, -47.0, "SP");
        let index = builder.build();

        let centroid = index.get(zip(1037)).unwrap();
        assert!((centroid.point.lat + 23.5).abs() < 1e-12);
        assert!((centroid.point.lng + 46.5).abs() < 1e-12);
        assert_eq!(centroid.state, "SP");
    }

    #[test]
    fn test_builder_majority_state_with_alphabetical_tie_break() {
        let mut builder = GeoIndex::builder();
        builder.add(zip(10), 0.0, 0.0, "RJ");
        builder.add(zip(10), 0.0, 0.0, "MG");
        let index = builder.build();
        assert_eq!(index.get(zip(10)).unwrap().state, "MG");
    }

    #[test]
    fn test_builder_rejects_invalid_coordinates() {
        let mut builder = GeoIndex::builder();
        builder.add(zip(10), 120.0, 0.0, "SP");
        builder.add(zip(11), f64::NAN, 0.0, "SP");
        assert_eq!(builder.rejected(), 2);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_resolve_unknown_prefix() {
        let index = GeoIndex::new();
        let err = index.resolve(LocationRole::Customer, zip(99999)).unwrap_err();
        assert_eq!(
            err,
            FeatureError::MissingLocation {
                role: LocationRole::Customer,
                zip_prefix: zip(99999)
            }
        );
    }

    #[test]
    fn test_distance_reports_missing_seller() {
        let mut builder = GeoIndex::builder();
        builder.add(zip(1037), -23.5, -46.6, "SP");
        let index = builder.build();
        let err = index.distance_km(zip(1037), zip(2000)).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::MissingLocation { role: LocationRole::Seller, .. }
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut builder = GeoIndex::builder();
        builder.add(zip(1037), -23.5, -46.6, "SP");
        builder.add(zip(20000), -22.9, -43.2, "RJ");
        let index = builder.build();
        let json = serde_json::to_string(&index).unwrap();
        let restored: GeoIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(index, restored);
    }
}
