//! Location types: zip prefixes and their centroids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Largest prefix representable with five digits.
const MAX_ZIP_PREFIX: u32 = 99_999;

/// Numeric zip-code prefix.
///
/// Leading zeros are not significant, so `"01037"` and `"1037"` are the same
/// prefix. Displayed zero-padded to five digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZipPrefix(u32);

impl ZipPrefix {
    /// Create a prefix, returning `None` when it has more than five digits.
    pub fn new(value: u32) -> Option<Self> {
        (value <= MAX_ZIP_PREFIX).then_some(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ZipPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl FromStr for ZipPrefix {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.len() > 5 || !trimmed.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(FeatureError::invalid_value(
                "zip_prefix",
                format!("'{}' is not a 1-5 digit prefix", s),
            ));
        }
        // At most five ASCII digits, always fits in u32.
        let value: u32 = trimmed
            .parse()
            .map_err(|_| FeatureError::invalid_value("zip_prefix", format!("'{}'", s)))?;
        Ok(Self(value))
    }
}

/// Which side of the shipment a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRole {
    Customer,
    Seller,
}

impl fmt::Display for LocationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => f.write_str("customer"),
            Self::Seller => f.write_str("seller"),
        }
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point, rejecting coordinates outside the valid ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(FeatureError::invalid_value(
                "lat",
                format!("{} outside [-90, 90]", lat),
            ));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(FeatureError::invalid_value(
                "lng",
                format!("{} outside [-180, 180]", lng),
            ));
        }
        Ok(Self { lat, lng })
    }
}

/// Centroid of all geolocation rows sharing a zip prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipCentroid {
    pub point: GeoPoint,
    /// Two-letter state code of the prefix.
    pub state: String,
}
