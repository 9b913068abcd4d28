//! Property-based tests for regressor output

use std::sync::OnceLock;

use proptest::prelude::*;
use regressor_core::{GradientBoostingConfig, GradientBoostingRegressor, Regressor};

/// Steep step between zero and large targets, unregularized, so raw leaf
/// sums overshoot below zero.
fn overshooting_model() -> &'static GradientBoostingRegressor {
    static MODEL: OnceLock<GradientBoostingRegressor> = OnceLock::new();
    MODEL.get_or_init(|| {
        let rows: Vec<Vec<f64>> = (0..200)
            .map(|i| vec![i as f64, ((i * 31) % 17) as f64, (i % 5) as f64])
            .collect();
        let targets: Vec<f64> = (0..200).map(|i| if i % 50 < 25 { 0.0 } else { 40.0 }).collect();
        let mut model = GradientBoostingRegressor::new(
            GradientBoostingConfig::new(150, 0.3)
                .with_regularization(0.0, 0.0)
                .with_early_stopping(None),
        );
        model.fit(&rows, &targets).unwrap();
        model
    })
}

proptest! {
    #[test]
    fn test_prediction_is_non_negative_for_any_input(
        row in prop::collection::vec(-1e6f64..1e6, 3)
    ) {
        let predicted = overshooting_model().predict_one(&row).unwrap();
        prop_assert!(predicted.is_finite());
        prop_assert!(predicted >= 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_prediction_is_non_negative_for_any_targets(
        targets in prop::collection::vec(0.0f64..60.0, 8..40)
    ) {
        let rows: Vec<Vec<f64>> = (0..targets.len()).map(|i| vec![i as f64]).collect();
        let mut model = GradientBoostingRegressor::new(
            GradientBoostingConfig::new(20, 0.5)
                .with_max_depth(3)
                .with_regularization(0.0, 0.0)
                .with_early_stopping(None),
        );
        model.fit(&rows, &targets).unwrap();
        for predicted in model.predict(&rows).unwrap() {
            prop_assert!(predicted >= 0.0);
        }
    }
}
