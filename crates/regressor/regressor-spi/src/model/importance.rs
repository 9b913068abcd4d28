//! Feature importance ranking.

use serde::{Deserialize, Serialize};

/// Share of total split gain attributed to one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

impl FeatureImportance {
    /// Pair names with importances and sort descending.
    ///
    /// Ties keep column order.
    pub fn ranking<S: AsRef<str>>(names: &[S], importances: &[f64]) -> Vec<FeatureImportance> {
        let mut ranked: Vec<FeatureImportance> = names
            .iter()
            .zip(importances)
            .map(|(name, &importance)| FeatureImportance {
                feature: name.as_ref().to_string(),
                importance,
            })
            .collect();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        ranked
    }
}
