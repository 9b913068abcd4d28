//! Regression trees grown on gradient histograms.

use rayon::prelude::*;
use regressor_api::GradientBoostingConfig;
use serde::{Deserialize, Serialize};

use crate::binning::FeatureBinner;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        gain: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A fitted tree stored as a flat node arena, root at index 0.
///
/// Rows go left when `value <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        loop {
            match self.nodes[node] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => node = if row[feature] <= threshold { left } else { right },
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    /// `(feature, gain)` of every split.
    pub fn split_gains(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes.iter().filter_map(|node| match *node {
            TreeNode::Split { feature, gain, .. } => Some((feature, gain)),
            TreeNode::Leaf { .. } => None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], id: usize) -> usize {
            match nodes[id] {
                TreeNode::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
                TreeNode::Leaf { .. } => 0,
            }
        }
        walk(&self.nodes, 0)
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    bin: usize,
    gain: f64,
}

/// Grows one tree against fixed gradients and hessians.
pub(crate) struct TreeBuilder<'a> {
    pub binner: &'a FeatureBinner,
    /// Column-major bins, `bins[feature][row]`.
    pub bins: &'a [Vec<u16>],
    pub grad: &'a [f64],
    pub hess: &'a [f64],
    pub config: &'a GradientBoostingConfig,
}

impl TreeBuilder<'_> {
    pub fn build(&self, rows: Vec<usize>) -> RegressionTree {
        let mut nodes = Vec::new();
        self.grow(&mut nodes, rows, 0);
        RegressionTree { nodes }
    }

    fn grow(&self, nodes: &mut Vec<TreeNode>, rows: Vec<usize>, depth: usize) -> usize {
        let g: f64 = rows.iter().map(|&i| self.grad[i]).sum();
        let h: f64 = rows.iter().map(|&i| self.hess[i]).sum();

        let id = nodes.len();
        nodes.push(TreeNode::Leaf {
            value: self.leaf_weight(g, h),
        });
        if depth >= self.config.max_depth || rows.len() < 2 {
            return id;
        }
        let Some(split) = self.best_split(&rows, g, h) else {
            return id;
        };

        let column = &self.bins[split.feature];
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&i| column[i] as usize <= split.bin);
        let left = self.grow(nodes, left_rows, depth + 1);
        let right = self.grow(nodes, right_rows, depth + 1);
        nodes[id] = TreeNode::Split {
            feature: split.feature,
            threshold: self.binner.threshold(split.feature, split.bin),
            gain: split.gain,
            left,
            right,
        };
        id
    }

    fn leaf_weight(&self, g: f64, h: f64) -> f64 {
        -g / (h + self.config.lambda) * self.config.learning_rate
    }

    fn best_split(&self, rows: &[usize], g: f64, h: f64) -> Option<SplitCandidate> {
        let lambda = self.config.lambda;
        let min_child = self.config.min_child_weight;
        let parent = g * g / (h + lambda);

        let per_feature: Vec<Option<SplitCandidate>> = (0..self.binner.n_features())
            .into_par_iter()
            .map(|feature| {
                let n_bins = self.binner.n_bins(feature);
                if n_bins < 2 {
                    return None;
                }
                let column = &self.bins[feature];
                let mut hist = vec![(0.0f64, 0.0f64); n_bins];
                for &i in rows {
                    let slot = &mut hist[column[i] as usize];
                    slot.0 += self.grad[i];
                    slot.1 += self.hess[i];
                }

                let mut best: Option<SplitCandidate> = None;
                let (mut gl, mut hl) = (0.0, 0.0);
                for (bin, &(bg, bh)) in hist.iter().enumerate().take(n_bins - 1) {
                    gl += bg;
                    hl += bh;
                    let (gr, hr) = (g - gl, h - hl);
                    if hl <= 0.0 || hr <= 0.0 || hl < min_child || hr < min_child {
                        continue;
                    }
                    let gain = 0.5 * (gl * gl / (hl + lambda) + gr * gr / (hr + lambda) - parent)
                        - self.config.gamma;
                    if gain > best.map_or(0.0, |b| b.gain) {
                        best = Some(SplitCandidate { feature, bin, gain });
                    }
                }
                best
            })
            .collect();

        // first feature wins ties
        per_feature
            .into_iter()
            .flatten()
            .fold(None, |best: Option<SplitCandidate>, c| match best {
                Some(b) if b.gain >= c.gain => Some(b),
                _ => Some(c),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rows: &[Vec<f64>], targets: &[f64], config: &GradientBoostingConfig) -> RegressionTree {
        let binner = FeatureBinner::fit(rows, config.max_bins);
        let bins = binner.transform(rows);
        // gradients of squared error around a zero prediction
        let grad: Vec<f64> = targets.iter().map(|y| -y).collect();
        let hess = vec![1.0; targets.len()];
        TreeBuilder {
            binner: &binner,
            bins: &bins,
            grad: &grad,
            hess: &hess,
            config,
        }
        .build((0..rows.len()).collect())
    }

    #[test]
    fn test_step_function_splits_on_informative_feature() {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![(i % 3) as f64, i as f64]).collect();
        let targets: Vec<f64> = (0..20).map(|i| if i < 10 { 2.0 } else { 12.0 }).collect();
        let config = GradientBoostingConfig::new(1, 1.0)
            .with_max_depth(1)
            .with_regularization(0.0, 0.0);
        let tree = build(&rows, &targets, &config);

        assert_eq!(tree.node_count(), 3);
        let gains: Vec<_> = tree.split_gains().collect();
        assert_eq!(gains.len(), 1);
        assert_eq!(gains[0].0, 1);
        // without shrinkage or regularization leaves are the group means
        assert!((tree.predict(&[0.0, 3.0]) - 2.0).abs() < 1e-12);
        assert!((tree.predict(&[0.0, 15.0]) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_depth_limit() {
        let rows: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..64).map(|i| (i * i) as f64).collect();
        let config = GradientBoostingConfig::default().with_max_depth(3);
        let tree = build(&rows, &targets, &config);
        assert!(tree.depth() <= 3);
        assert!(tree.depth() >= 1);
    }

    #[test]
    fn test_constant_target_makes_single_leaf() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let targets = vec![5.0; 10];
        let config = GradientBoostingConfig::new(1, 1.0).with_regularization(0.0, 0.0);
        let tree = build(&rows, &targets, &config);
        assert_eq!(tree.node_count(), 1);
        assert!((tree.predict(&[3.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_child_weight_blocks_small_leaves() {
        let rows: Vec<Vec<f64>> = (0..4).map(|i| vec![i as f64]).collect();
        let targets = vec![0.0, 0.0, 0.0, 100.0];
        let config = GradientBoostingConfig::new(1, 1.0)
            .with_max_depth(1)
            .with_min_child_weight(2.0);
        let tree = build(&rows, &targets, &config);

        // isolating the last row is blocked, so the split lands in the middle
        assert_eq!(tree.split_gains().count(), 1);
        assert_eq!(tree.predict(&[0.0]), 0.0);
        assert!((tree.predict(&[3.0]) - 100.0 / 3.0).abs() < 1e-9);
    }
}
