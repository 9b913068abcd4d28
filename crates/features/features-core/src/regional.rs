//! Regional delivery-time aggregates.
//!
//! A row's aggregate may only use deliveries that completed strictly before
//! its purchase timestamp. Ordering is by full timestamp, never by calendar
//! month, so December and January purchases are sequenced correctly.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::encoder::normalize_category;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct RunningMean {
    sum: f64,
    count: u64,
}

impl RunningMean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean delivery days per customer region, plus a global fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionalDeliveryStats {
    regions: BTreeMap<String, RunningMean>,
    global: RunningMean,
}

impl RegionalDeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed delivery.
    pub fn observe(&mut self, region: &str, delivery_days: f64) {
        if let Some(region) = normalize_category(region) {
            self.regions.entry(region).or_default().push(delivery_days);
        }
        self.global.push(delivery_days);
    }

    /// Region mean, falling back to the global mean, then to 0.
    pub fn mean_for(&self, region: Option<&str>) -> f64 {
        region
            .and_then(normalize_category)
            .and_then(|r| self.regions.get(&r))
            .and_then(RunningMean::mean)
            .or_else(|| self.global.mean())
            .unwrap_or(0.0)
    }

    /// Number of deliveries observed.
    pub fn observations(&self) -> u64 {
        self.global.count
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

/// One historical order as seen by the aggregate computation.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryEvent<'a> {
    pub region: &'a str,
    pub purchased_at: NaiveDateTime,
    pub delivered_at: NaiveDateTime,
    pub delivery_days: f64,
}

/// Per-event regional mean delivery time using only deliveries completed
/// strictly before each event's purchase.
///
/// Returns one value per input event, in input order.
pub fn prior_region_means(events: &[DeliveryEvent<'_>]) -> Vec<f64> {
    let mut by_purchase: Vec<usize> = (0..events.len()).collect();
    by_purchase.sort_by_key(|&i| events[i].purchased_at);

    let mut by_delivery: Vec<usize> = (0..events.len()).collect();
    by_delivery.sort_by_key(|&i| events[i].delivered_at);

    let mut stats = RegionalDeliveryStats::new();
    let mut next_delivery = 0;
    let mut means = vec![0.0; events.len()];

    for &i in &by_purchase {
        let cutoff = events[i].purchased_at;
        while next_delivery < by_delivery.len()
            && events[by_delivery[next_delivery]].delivered_at < cutoff
        {
            let done = &events[by_delivery[next_delivery]];
            stats.observe(done.region, done.delivery_days);
            next_delivery += 1;
        }
        means[i] = stats.mean_for(Some(events[i].region));
    }

    means
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn event(region: &str, purchased: NaiveDateTime, delivered: NaiveDateTime) -> DeliveryEvent<'_> {
        DeliveryEvent {
            region,
            purchased_at: purchased,
            delivered_at: delivered,
            delivery_days: (delivered - purchased).num_days() as f64,
        }
    }

    #[test]
    fn test_first_event_has_no_history() {
        let events = [event("SP", ts(2017, 1, 1), ts(2017, 1, 5))];
        assert_eq!(prior_region_means(&events), vec![0.0]);
    }

    #[test]
    fn test_only_completed_deliveries_count() {
        let events = [
            // delivered Jan 11 after 10 days
            event("SP", ts(2017, 1, 1), ts(2017, 1, 11)),
            // purchased Jan 5: first delivery still in transit
            event("SP", ts(2017, 1, 5), ts(2017, 1, 8)),
            // purchased Jan 20: both earlier deliveries done (10 and 3 days)
            event("SP", ts(2017, 1, 20), ts(2017, 1, 22)),
        ];
        let means = prior_region_means(&events);
        assert_eq!(means[0], 0.0);
        assert_eq!(means[1], 0.0);
        assert!((means[2] - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_delivery_at_exact_purchase_time_is_excluded() {
        let events = [
            event("SP", ts(2017, 1, 1), ts(2017, 1, 4)),
            event("SP", ts(2017, 1, 4), ts(2017, 1, 6)),
        ];
        assert_eq!(prior_region_means(&events)[1], 0.0);
    }

    #[test]
    fn test_falls_back_to_global_mean_for_new_region() {
        let events = [
            event("SP", ts(2017, 1, 1), ts(2017, 1, 9)),
            event("AM", ts(2017, 2, 1), ts(2017, 2, 20)),
        ];
        let means = prior_region_means(&events);
        assert!((means[1] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_year_boundary_ordering() {
        let events = [
            // January purchase listed first but happens after the December one
            event("RJ", ts(2018, 1, 10), ts(2018, 1, 15)),
            event("RJ", ts(2017, 12, 20), ts(2018, 1, 2)),
        ];
        let means = prior_region_means(&events);
        assert!((means[0] - 13.0).abs() < 1e-12);
        assert_eq!(means[1], 0.0);
    }

    #[test]
    fn test_stats_mean_for_unknown_region_uses_global() {
        let mut stats = RegionalDeliveryStats::new();
        stats.observe("sp", 10.0);
        stats.observe("RJ", 20.0);
        assert_eq!(stats.mean_for(Some("SP")), 10.0);
        assert_eq!(stats.mean_for(Some("XX")), 15.0);
        assert_eq!(stats.mean_for(None), 15.0);
        assert_eq!(stats.observations(), 2);
        assert_eq!(RegionalDeliveryStats::new().mean_for(Some("SP")), 0.0);
    }
}
