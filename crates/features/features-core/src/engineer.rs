//! The fitted feature transform.

use chrono::NaiveDateTime;
use features_api::FeatureConfig;
use features_spi::{
    CalendarInput, EncodingNote, FeatureError, FeatureInput, FeatureSchema, FeatureVector,
    Featurized, Featurizer, LocationRole, OrderRecord, Result, RouteInput,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calendar::calendar_of;
use crate::distance::haversine_km;
use crate::encoder::{CategoryEncoder, UNKNOWN_CODE};
use crate::geo_index::GeoIndex;
use crate::regional::{prior_region_means, DeliveryEvent, RegionalDeliveryStats};

/// Counts of historical rows left out of the training set, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionReport {
    /// Never delivered, so no target.
    pub missing_target: usize,
    /// Delivered before purchase.
    pub negative_target: usize,
    /// Customer or seller prefix without a centroid.
    pub missing_location: usize,
    /// Missing weight or a negative / non-finite price, freight or volume.
    pub invalid_attributes: usize,
}

impl ExclusionReport {
    pub fn total(&self) -> usize {
        self.missing_target + self.negative_target + self.missing_location + self.invalid_attributes
    }
}

/// Featurized historical rows with their targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub order_ids: Vec<String>,
    pub vectors: Vec<FeatureVector>,
    /// Delivery days, always finite and non-negative.
    pub targets: Vec<f64>,
    pub purchased_at: Vec<NaiveDateTime>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vectors as model input rows.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.vectors.iter().map(FeatureVector::to_vec).collect()
    }

    /// Rows at the given indices, in that order.
    pub fn subset(&self, indices: &[usize]) -> TrainingSet {
        TrainingSet {
            order_ids: indices.iter().map(|&i| self.order_ids[i].clone()).collect(),
            vectors: indices.iter().map(|&i| self.vectors[i]).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
            purchased_at: indices.iter().map(|&i| self.purchased_at[i]).collect(),
        }
    }
}

/// Output of [`FeatureEngineer::fit`].
#[derive(Debug, Clone)]
pub struct FittedFeatures {
    pub engineer: FeatureEngineer,
    pub training_set: TrainingSet,
    pub exclusions: ExclusionReport,
}

/// Fitted feature transform.
///
/// Holds the centroid table, the frozen region and category encoders and the
/// regional delivery statistics computed from training deliveries. Persisted
/// as part of the model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEngineer {
    config: FeatureConfig,
    geo: GeoIndex,
    regions: CategoryEncoder,
    categories: CategoryEncoder,
    regional_stats: RegionalDeliveryStats,
}

struct Candidate<'a> {
    record: &'a OrderRecord,
    delivered_at: NaiveDateTime,
    days: f64,
    distance_km: f64,
    weight_g: f64,
}

struct VectorParts<'a> {
    distance_km: f64,
    calendar: CalendarInput,
    customer_state: Option<&'a str>,
    seller_state: Option<&'a str>,
    product_category: Option<&'a str>,
    price: f64,
    freight_value: f64,
    product_weight_g: f64,
    product_vol_cm3: f64,
    region_mean_delivery_days: f64,
}

impl FeatureEngineer {
    /// Fit encoders and regional statistics on historical records and
    /// featurize them.
    ///
    /// Rows without a usable target, without centroids or with invalid
    /// attributes are excluded and counted in the returned report.
    pub fn fit(records: &[OrderRecord], geo: GeoIndex, config: FeatureConfig) -> Result<FittedFeatures> {
        config.validate()?;

        let mut exclusions = ExclusionReport::default();
        let mut candidates = Vec::with_capacity(records.len());

        for record in records {
            let (delivered_at, days) = match (record.delivered_at, record.delivery_days()) {
                (Some(at), Some(days)) if days >= 0 => (at, days as f64),
                (Some(_), Some(_)) => {
                    exclusions.negative_target += 1;
                    continue;
                }
                _ => {
                    exclusions.missing_target += 1;
                    continue;
                }
            };
            let distance_km = match geo.distance_km(record.customer_zip_prefix, record.seller_zip_prefix) {
                Ok(d) => d,
                Err(_) => {
                    exclusions.missing_location += 1;
                    continue;
                }
            };
            let weight_g = match record.product_weight_g {
                Some(w) if valid_amount(w) => w,
                _ => {
                    exclusions.invalid_attributes += 1;
                    continue;
                }
            };
            if !valid_amount(record.price)
                || !valid_amount(record.freight_value)
                || !valid_amount(record.product_vol_cm3)
            {
                exclusions.invalid_attributes += 1;
                continue;
            }
            candidates.push(Candidate {
                record,
                delivered_at,
                days,
                distance_km,
                weight_g,
            });
        }

        if exclusions.total() > 0 {
            warn!(
                missing_target = exclusions.missing_target,
                negative_target = exclusions.negative_target,
                missing_location = exclusions.missing_location,
                invalid_attributes = exclusions.invalid_attributes,
                "excluded historical rows from training"
            );
        }
        if candidates.is_empty() {
            return Err(FeatureError::EmptyTrainingSet(format!(
                "all {} records were excluded",
                records.len()
            )));
        }

        let regions = CategoryEncoder::fit(candidates.iter().flat_map(|c| {
            [
                c.record.customer_state.as_str(),
                c.record.seller_state.as_str(),
            ]
        }));
        let categories = CategoryEncoder::fit(
            candidates
                .iter()
                .filter_map(|c| c.record.product_category.as_deref()),
        );

        let events: Vec<DeliveryEvent<'_>> = candidates
            .iter()
            .map(|c| DeliveryEvent {
                region: c.record.customer_state.as_str(),
                purchased_at: c.record.purchased_at,
                delivered_at: c.delivered_at,
                delivery_days: c.days,
            })
            .collect();
        let prior_means = prior_region_means(&events);

        let mut regional_stats = RegionalDeliveryStats::new();
        for event in &events {
            regional_stats.observe(event.region, event.delivery_days);
        }

        let engineer = FeatureEngineer {
            config,
            geo,
            regions,
            categories,
            regional_stats,
        };

        let mut training_set = TrainingSet::default();
        for (candidate, region_mean) in candidates.iter().zip(prior_means) {
            let record = candidate.record;
            let mut notes = Vec::new();
            let vector = engineer.build_vector(
                VectorParts {
                    distance_km: candidate.distance_km,
                    calendar: calendar_of(&record.purchased_at),
                    customer_state: Some(record.customer_state.as_str()),
                    seller_state: Some(record.seller_state.as_str()),
                    product_category: record.product_category.as_deref(),
                    price: record.price,
                    freight_value: record.freight_value,
                    product_weight_g: candidate.weight_g,
                    product_vol_cm3: record.product_vol_cm3,
                    region_mean_delivery_days: region_mean,
                },
                &mut notes,
            );
            training_set.order_ids.push(record.order_id.clone());
            training_set.vectors.push(vector);
            training_set.targets.push(candidate.days);
            training_set.purchased_at.push(record.purchased_at);
        }

        info!(
            records = records.len(),
            featurized = training_set.len(),
            regions = engineer.regions.len(),
            categories = engineer.categories.len(),
            "fitted feature engineer"
        );

        Ok(FittedFeatures {
            engineer,
            training_set,
            exclusions,
        })
    }

    fn build_vector(&self, parts: VectorParts<'_>, notes: &mut Vec<EncodingNote>) -> FeatureVector {
        let customer = self.regions.encode(parts.customer_state);
        if !customer.known {
            notes.push(EncodingNote::new("customer_state", parts.customer_state));
        }
        let seller = self.regions.encode(parts.seller_state);
        if !seller.known {
            notes.push(EncodingNote::new("seller_state", parts.seller_state));
        }
        let category = self.categories.encode(parts.product_category);
        if !category.known {
            notes.push(EncodingNote::new("product_category", parts.product_category));
        }

        FeatureVector {
            distance_km: parts.distance_km,
            purchase_month: parts.calendar.month,
            purchase_dow: parts.calendar.day_of_week,
            is_weekend_order: parts.calendar.day_of_week >= self.config.weekend_start_dow,
            customer_region_code: customer.code,
            seller_region_code: seller.code,
            same_region: customer.code != UNKNOWN_CODE && customer.code == seller.code,
            region_mean_delivery_days: parts.region_mean_delivery_days,
            price: parts.price,
            freight_value: parts.freight_value,
            product_weight_g: parts.product_weight_g,
            product_vol_cm3: parts.product_vol_cm3,
            product_category_code: category.code,
        }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn geo(&self) -> &GeoIndex {
        &self.geo
    }

    pub fn regions(&self) -> &CategoryEncoder {
        &self.regions
    }

    pub fn categories(&self) -> &CategoryEncoder {
        &self.categories
    }

    pub fn regional_stats(&self) -> &RegionalDeliveryStats {
        &self.regional_stats
    }
}

impl Featurizer for FeatureEngineer {
    fn featurize(&self, input: &FeatureInput) -> Result<Featurized> {
        let (distance_km, customer_derived, seller_derived) = match input.route {
            RouteInput::ZipPrefixes { customer, seller } => {
                let c = self.geo.resolve(LocationRole::Customer, customer)?;
                let s = self.geo.resolve(LocationRole::Seller, seller)?;
                (
                    haversine_km(c.point, s.point),
                    Some(c.state.as_str()),
                    Some(s.state.as_str()),
                )
            }
            RouteInput::Distance { km } => (km, None, None),
        };

        let customer_state = input.customer_state.as_deref().or(customer_derived);
        let seller_state = input.seller_state.as_deref().or(seller_derived);

        let mut notes = Vec::new();
        let vector = self.build_vector(
            VectorParts {
                distance_km,
                calendar: input.calendar,
                customer_state,
                seller_state,
                product_category: input.product_category.as_deref(),
                price: input.price,
                freight_value: input.freight_value,
                product_weight_g: input.product_weight_g,
                product_vol_cm3: input.product_vol_cm3,
                region_mean_delivery_days: self.regional_stats.mean_for(customer_state),
            },
            &mut notes,
        );
        vector.validate()?;

        Ok(Featurized { vector, notes })
    }

    fn schema(&self) -> FeatureSchema {
        FeatureSchema::current()
    }
}

fn valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
