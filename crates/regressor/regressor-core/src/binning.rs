//! Feature quantization for histogram split finding.
//!
//! Each feature gets an ascending list of split thresholds. A value falls in
//! bin `b` when it is above `thresholds[b - 1]` and at most `thresholds[b]`,
//! so "bin <= b" and "value <= thresholds[b]" select the same rows.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-feature split thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureBinner {
    thresholds: Vec<Vec<f64>>,
}

impl FeatureBinner {
    /// Derive thresholds from training rows.
    ///
    /// Features with at most `max_bins` distinct values split between every
    /// pair of neighbours; others use quantile cut points.
    pub fn fit(rows: &[Vec<f64>], max_bins: usize) -> Self {
        let dims = rows.first().map_or(0, Vec::len);
        let thresholds = (0..dims)
            .into_par_iter()
            .map(|j| {
                let mut column: Vec<f64> = rows.iter().map(|row| row[j]).collect();
                column.sort_by(f64::total_cmp);
                feature_thresholds(&column, max_bins)
            })
            .collect();
        Self { thresholds }
    }

    pub fn n_features(&self) -> usize {
        self.thresholds.len()
    }

    pub fn n_bins(&self, feature: usize) -> usize {
        self.thresholds[feature].len() + 1
    }

    pub fn threshold(&self, feature: usize, bin: usize) -> f64 {
        self.thresholds[feature][bin]
    }

    pub fn bin(&self, feature: usize, value: f64) -> u16 {
        self.thresholds[feature].partition_point(|&t| t < value) as u16
    }

    /// Column-major bin matrix: `result[feature][row]`.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<u16>> {
        (0..self.n_features())
            .into_par_iter()
            .map(|j| rows.iter().map(|row| self.bin(j, row[j])).collect())
            .collect()
    }
}

fn feature_thresholds(sorted: &[f64], max_bins: usize) -> Vec<f64> {
    let mut distinct = sorted.to_vec();
    distinct.dedup();

    let mut cuts = if distinct.len() <= max_bins {
        distinct
    } else {
        (1..max_bins)
            .map(|i| sorted[i * sorted.len() / max_bins])
            .collect::<Vec<f64>>()
    };
    cuts.dedup();
    // the largest value never separates anything
    if let (Some(&last), Some(&max)) = (cuts.last(), sorted.last()) {
        if last >= max {
            cuts.pop();
        }
    }
    cuts
}
