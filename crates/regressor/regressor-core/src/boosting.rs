//! Gradient boosting over histogram regression trees.

use regressor_api::GradientBoostingConfig;
use regressor_spi::{Regressor, RegressorError, Result, TrainingReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::binning::FeatureBinner;
use crate::metrics::rmse;
use crate::tree::{RegressionTree, TreeBuilder};

/// Gradient-boosted regression trees with squared-error loss.
///
/// Starts from the target mean and adds one shrunken tree per round.
/// Predictions are clamped at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    config: GradientBoostingConfig,
    base_score: f64,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

struct EvalSet<'a> {
    features: &'a [Vec<f64>],
    targets: &'a [f64],
}

impl GradientBoostingRegressor {
    pub fn new(config: GradientBoostingConfig) -> Self {
        Self {
            config,
            base_score: 0.0,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn config(&self) -> &GradientBoostingConfig {
        &self.config
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn raw_predict(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|tree| tree.predict(row)).sum::<f64>()
    }

    fn check_rows(&self, features: &[Vec<f64>], targets: &[f64], expected: usize) -> Result<()> {
        if features.len() != targets.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: features.len(),
                got: targets.len(),
            });
        }
        for row in features {
            if row.len() != expected {
                return Err(RegressorError::DimensionMismatch {
                    expected,
                    got: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(RegressorError::invalid_parameter(
                    "features",
                    "all feature values must be finite",
                ));
            }
        }
        if let Some((index, &value)) = targets
            .iter()
            .enumerate()
            .find(|(_, y)| !(y.is_finite() && **y >= 0.0))
        {
            return Err(RegressorError::InvalidTarget { index, value });
        }
        Ok(())
    }

    fn train(
        &mut self,
        features: &[Vec<f64>],
        targets: &[f64],
        eval: Option<EvalSet<'_>>,
    ) -> Result<TrainingReport> {
        self.config.validate()?;
        if features.len() < 2 {
            return Err(RegressorError::InsufficientData {
                required: 2,
                got: features.len(),
            });
        }
        let n_features = features[0].len();
        self.check_rows(features, targets, n_features)?;
        if let Some(eval) = &eval {
            if eval.features.is_empty() {
                return Err(RegressorError::InsufficientData {
                    required: 1,
                    got: 0,
                });
            }
            self.check_rows(eval.features, eval.targets, n_features)?;
        }

        let binner = FeatureBinner::fit(features, self.config.max_bins);
        let bins = binner.transform(features);
        let base_score = targets.iter().sum::<f64>() / targets.len() as f64;
        let hess = vec![1.0; targets.len()];

        let mut train_pred = vec![base_score; targets.len()];
        let mut eval_pred = eval
            .as_ref()
            .map(|e| vec![base_score; e.targets.len()])
            .unwrap_or_default();
        let mut trees = Vec::new();
        let mut best: Option<(usize, f64)> = None;

        for round in 0..self.config.n_estimators {
            let grad: Vec<f64> = train_pred.iter().zip(targets).map(|(p, y)| p - y).collect();
            let tree = TreeBuilder {
                binner: &binner,
                bins: &bins,
                grad: &grad,
                hess: &hess,
                config: &self.config,
            }
            .build((0..targets.len()).collect());

            for (pred, row) in train_pred.iter_mut().zip(features) {
                *pred += tree.predict(row);
            }
            trees.push(tree);

            let Some(eval) = &eval else {
                continue;
            };
            for (pred, row) in eval_pred.iter_mut().zip(eval.features) {
                *pred += trees[round].predict(row);
            }
            let clamped: Vec<f64> = eval_pred.iter().map(|p| p.max(0.0)).collect();
            let score = rmse(eval.targets, &clamped);
            if best.map_or(true, |(_, b)| score < b) {
                best = Some((round, score));
            }
            if let (Some(patience), Some((best_round, _))) = (self.config.early_stopping_rounds, best) {
                if round - best_round >= patience {
                    debug!(round, best_round, "early stopping");
                    break;
                }
            }
        }

        let best_iteration = best.map_or(trees.len() - 1, |(round, _)| round);
        trees.truncate(best_iteration + 1);

        self.base_score = base_score;
        self.trees = trees;
        self.n_features = n_features;

        let fitted: Vec<f64> = features.iter().map(|row| self.raw_predict(row).max(0.0)).collect();
        let report = TrainingReport {
            rounds: self.trees.len(),
            best_iteration,
            train_rmse: rmse(targets, &fitted),
            eval_rmse: best.map(|(_, score)| score),
        };
        info!(
            rows = targets.len(),
            rounds = report.rounds,
            best_iteration,
            train_rmse = report.train_rmse,
            eval_rmse = ?report.eval_rmse,
            "fitted gradient boosting regressor"
        );
        Ok(report)
    }
}

impl Default for GradientBoostingRegressor {
    fn default() -> Self {
        Self::new(GradientBoostingConfig::default())
    }
}

impl Regressor for GradientBoostingRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<TrainingReport> {
        self.train(features, targets, None)
    }

    fn fit_with_eval(
        &mut self,
        features: &[Vec<f64>],
        targets: &[f64],
        eval_features: &[Vec<f64>],
        eval_targets: &[f64],
    ) -> Result<TrainingReport> {
        self.train(
            features,
            targets,
            Some(EvalSet {
                features: eval_features,
                targets: eval_targets,
            }),
        )
    }

    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        if !self.is_fitted() {
            return Err(RegressorError::NotFitted);
        }
        if row.len() != self.n_features {
            return Err(RegressorError::DimensionMismatch {
                expected: self.n_features,
                got: row.len(),
            });
        }
        Ok(self.raw_predict(row).max(0.0))
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    fn feature_importance(&self) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(RegressorError::NotFitted);
        }
        let mut gains = vec![0.0; self.n_features];
        for (feature, gain) in self.trees.iter().flat_map(RegressionTree::split_gains) {
            gains[feature] += gain;
        }
        let total: f64 = gains.iter().sum();
        if total > 0.0 {
            gains.iter_mut().for_each(|g| *g /= total);
        }
        Ok(gains)
    }
}
