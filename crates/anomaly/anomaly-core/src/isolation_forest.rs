//! Isolation forest anomaly scoring.
//!
//! Each tree isolates a random subsample by recursively splitting on a random
//! feature at a random threshold. Points that separate after few splits are
//! anomalous. Scores follow `2^(-E[h(x)] / c(psi))`, in (0, 1].

use anomaly_api::IsolationForestConfig;
use anomaly_spi::{AnomalyDetector, AnomalyError, AnomalyResult, Result};
use rand::prelude::*;
use rand::seq::index;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::scaler::StandardScaler;

const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Average path length of an unsuccessful search in a binary search tree
/// of `n` points.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum IsolationNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

/// One isolation tree stored as a flat node arena, root at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationTree {
    nodes: Vec<IsolationNode>,
}

impl IsolationTree {
    fn build(rows: &[Vec<f64>], sample: Vec<usize>, height_limit: usize, rng: &mut StdRng) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(rows, sample, 0, height_limit, rng);
        tree
    }

    fn grow(
        &mut self,
        rows: &[Vec<f64>],
        sample: Vec<usize>,
        depth: usize,
        height_limit: usize,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(IsolationNode::Leaf { size: sample.len() });
        if depth >= height_limit || sample.len() <= 1 {
            return id;
        }

        let dims = rows[sample[0]].len();
        let splittable: Vec<(usize, f64, f64)> = (0..dims)
            .filter_map(|j| {
                let (lo, hi) = sample.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
                    (lo.min(rows[i][j]), hi.max(rows[i][j]))
                });
                (hi > lo).then_some((j, lo, hi))
            })
            .collect();
        let Some(&(feature, lo, hi)) = splittable.choose(rng) else {
            return id;
        };
        let threshold = rng.gen_range(lo..hi);

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            sample.into_iter().partition(|&i| rows[i][feature] <= threshold);
        let left = self.grow(rows, left_rows, depth + 1, height_limit, rng);
        let right = self.grow(rows, right_rows, depth + 1, height_limit, rng);
        self.nodes[id] = IsolationNode::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    /// Path length of a scaled row, adjusted for unsplit leaf size.
    pub fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;
        loop {
            match self.nodes[node] {
                IsolationNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[feature] <= threshold { left } else { right };
                    depth += 1.0;
                }
                IsolationNode::Leaf { size } => return depth + average_path_length(size),
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Seeded isolation forest over standardized feature vectors.
///
/// The decision threshold is the `1 - contamination` quantile of the
/// training scores; a row is anomalous when its score is strictly above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForest {
    config: IsolationForestConfig,
    scaler: StandardScaler,
    trees: Vec<IsolationTree>,
    sample_size: usize,
    threshold: Option<f64>,
}

impl IsolationForest {
    pub fn new(config: IsolationForestConfig) -> Self {
        Self {
            config,
            scaler: StandardScaler::new(),
            trees: Vec::new(),
            sample_size: 0,
            threshold: None,
        }
    }

    pub fn config(&self) -> &IsolationForestConfig {
        &self.config
    }

    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    pub fn trees(&self) -> &[IsolationTree] {
        &self.trees
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn tree_seed(&self, tree: usize) -> u64 {
        self.config
            .seed
            .wrapping_add((tree as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn score_scaled(&self, row: &[f64]) -> f64 {
        let mean_path = self.trees.iter().map(|t| t.path_length(row)).sum::<f64>()
            / self.trees.len() as f64;
        2f64.powf(-mean_path / average_path_length(self.sample_size))
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new(IsolationForestConfig::default())
    }
}

impl AnomalyDetector for IsolationForest {
    fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        self.config.validate()?;
        if data.len() < 2 {
            return Err(AnomalyError::InsufficientData {
                required: 2,
                got: data.len(),
            });
        }
        if let Some(i) = data.iter().position(|row| row.iter().any(|v| !v.is_finite())) {
            return Err(AnomalyError::NonFiniteRow { row: i });
        }

        let mut scaler = StandardScaler::new();
        scaler.fit(data)?;
        let scaled = data
            .iter()
            .map(|row| scaler.transform(row))
            .collect::<Result<Vec<_>>>()?;

        let sample_size = self.config.max_samples.min(scaled.len());
        let height_limit = (sample_size as f64).log2().ceil() as usize;
        self.sample_size = sample_size;

        let trees: Vec<IsolationTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(self.tree_seed(t));
                let sample = index::sample(&mut rng, scaled.len(), sample_size).into_vec();
                IsolationTree::build(&scaled, sample, height_limit, &mut rng)
            })
            .collect();
        self.trees = trees;
        self.scaler = scaler;

        let mut scores: Vec<f64> = scaled.par_iter().map(|row| self.score_scaled(row)).collect();
        scores.sort_by(f64::total_cmp);
        let threshold = quantile(&scores, 1.0 - self.config.contamination);
        self.threshold = Some(threshold);

        debug!(height_limit, sample_size, "built isolation trees");
        info!(
            rows = data.len(),
            trees = self.trees.len(),
            threshold,
            "fitted isolation forest"
        );
        Ok(())
    }

    fn score(&self, sample: &[f64]) -> Result<f64> {
        if !self.is_fitted() {
            return Err(AnomalyError::NotFitted);
        }
        let scaled = self.scaler.transform(sample)?;
        Ok(self.score_scaled(&scaled))
    }

    fn threshold(&self) -> Result<f64> {
        self.threshold.ok_or(AnomalyError::NotFitted)
    }

    fn is_fitted(&self) -> bool {
        self.threshold.is_some() && !self.trees.is_empty()
    }

    fn detect(&self, data: &[Vec<f64>]) -> Result<AnomalyResult> {
        let threshold = self.threshold()?;
        let scores = data
            .par_iter()
            .map(|row| self.score(row))
            .collect::<Result<Vec<f64>>>()?;
        let is_anomaly = scores.iter().map(|&s| s > threshold).collect();
        Ok(AnomalyResult::new(is_anomaly, scores, threshold))
    }
}

/// Linear-interpolated quantile of sorted values, NaN when empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // 2 * (ln 255 + gamma) - 2 * 255 / 256
        let expected = 2.0 * (255f64.ln() + EULER_GAMMA) - 2.0 * 255.0 / 256.0;
        assert!((average_path_length(256) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(quantile(&sorted, 1.0), 3.0);
        assert!((quantile(&sorted, 0.5) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_of_empty_is_nan() {
        assert!(quantile(&[], 0.9).is_nan());
        assert_eq!(quantile(&[2.5], 0.9), 2.5);
    }

    #[test]
    fn test_tree_seeds_differ() {
        let forest = IsolationForest::default();
        assert_ne!(forest.tree_seed(0), forest.tree_seed(1));
    }

    #[test]
    fn test_unfitted_forest() {
        let forest = IsolationForest::default();
        assert!(!forest.is_fitted());
        assert_eq!(forest.score(&[1.0]).unwrap_err(), AnomalyError::NotFitted);
        assert_eq!(forest.threshold().unwrap_err(), AnomalyError::NotFitted);
    }

    #[test]
    fn test_single_row_rejected() {
        let mut forest = IsolationForest::default();
        let err = forest.fit(&[vec![1.0, 2.0]]).unwrap_err();
        assert_eq!(err, AnomalyError::InsufficientData { required: 2, got: 1 });
    }
}
