//! The two-phase training job.
//!
//! 1. Fit the feature transform and the anomaly scorer on every usable row.
//! 2. Evaluate: fit the regressor on the training split with early stopping
//!    on the held-out split and record its metrics.
//! 3. Refit on all clean rows for exactly the best number of rounds.

use anomaly_facade::{AnomalyDetector, IsolationForest};
use artifact::{ModelArtifact, TrainingSummary};
use chrono::Utc;
use features_facade::{FeatureEngineer, FeatureRanges, GeoIndex, OrderRecord, TrainingSet};
use regressor_facade::{
    chronological_split, evaluate, shuffled_split, EvaluationMetrics, GradientBoostingRegressor,
    Regressor, SplitStrategy,
};
use tracing::{info, warn};

use crate::config::TrainingConfig;
use crate::error::Result;

/// Offline training job producing a [`ModelArtifact`].
#[derive(Debug, Clone, Default)]
pub struct TrainingJob {
    config: TrainingConfig,
}

impl TrainingJob {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn run(&self, records: &[OrderRecord], geo: GeoIndex) -> Result<ModelArtifact> {
        self.config.validate()?;
        info!(records = records.len(), centroids = geo.len(), "training started");

        let fitted = FeatureEngineer::fit(records, geo, self.config.features.clone())?;
        let training_set = fitted.training_set;
        let rows = training_set.rows();

        let mut anomaly = IsolationForest::new(self.config.anomaly.clone());
        anomaly.fit(&rows)?;
        let flags = anomaly.detect(&rows)?;
        let anomalies_flagged = flags.anomaly_count();
        if anomalies_flagged > 0 {
            warn!(
                anomalies = anomalies_flagged,
                rate = flags.anomaly_rate(),
                excluded = self.config.exclude_anomalies,
                "anomalous training rows flagged"
            );
        }

        let clean = if self.config.exclude_anomalies {
            training_set.subset(&flags.clean_indices())
        } else {
            training_set.clone()
        };

        let metrics = self.evaluate(&clean)?;

        let final_rounds = metrics.best_iteration.map_or(1, |best| best + 1);
        let mut regressor = GradientBoostingRegressor::new(
            self.config
                .boosting
                .clone()
                .with_early_stopping(None)
                .with_n_estimators(final_rounds),
        );
        regressor.fit(&clean.rows(), &clean.targets)?;
        info!(rounds = final_rounds, rows = clean.len(), "fitted final regressor");

        let ranges = FeatureRanges::fit(
            &clean.vectors,
            self.config.features.range_lower_quantile,
            self.config.features.range_upper_quantile,
        );
        let summary = TrainingSummary {
            total_records: records.len(),
            training_records: training_set.len(),
            anomalies_flagged,
            regressor_records: clean.len(),
            exclusions: fitted.exclusions,
            trained_at: Utc::now(),
        };

        Ok(ModelArtifact::new(
            fitted.engineer,
            anomaly,
            regressor,
            ranges,
            metrics,
            summary,
        ))
    }

    /// Held-out evaluation with early stopping.
    fn evaluate(&self, clean: &TrainingSet) -> Result<EvaluationMetrics> {
        let evaluation = &self.config.evaluation;
        let (train_idx, test_idx) = match evaluation.split {
            SplitStrategy::Chronological => {
                chronological_split(&clean.purchased_at, evaluation.test_fraction)
            }
            SplitStrategy::Shuffled => {
                shuffled_split(clean.len(), evaluation.test_fraction, evaluation.seed)
            }
        };
        let train = clean.subset(&train_idx);
        let test = clean.subset(&test_idx);
        let test_rows = test.rows();

        let mut regressor = GradientBoostingRegressor::new(self.config.boosting.clone());
        let report =
            regressor.fit_with_eval(&train.rows(), &train.targets, &test_rows, &test.targets)?;
        let predicted = regressor.predict(&test_rows)?;

        let mut metrics = evaluate(&test.targets, &predicted, evaluation.tolerance_days);
        metrics.best_iteration = Some(report.best_iteration);
        info!(
            train = train.len(),
            test = test.len(),
            mae = metrics.mae,
            rmse = metrics.rmse,
            r2 = metrics.r2_score,
            business_accuracy = metrics.business_accuracy,
            best_iteration = report.best_iteration,
            "evaluated on held-out split"
        );
        Ok(metrics)
    }
}
