//! End-to-end tests for the isolation forest

use anomaly_core::{AnomalyDetector, AnomalyError, IsolationForest, IsolationForestConfig};

/// 400 points on a 20x20 grid plus one far-away point at the end.
fn grid_with_outlier() -> Vec<Vec<f64>> {
    let mut data: Vec<Vec<f64>> = (0..400)
        .map(|i| vec![(i % 20) as f64, (i / 20) as f64, 5.0])
        .collect();
    data.push(vec![500.0, -300.0, 5.0]);
    data
}

fn fitted(config: IsolationForestConfig) -> IsolationForest {
    let mut forest = IsolationForest::new(config);
    forest.fit(&grid_with_outlier()).unwrap();
    forest
}

#[test]
fn test_outlier_is_flagged() {
    let forest = fitted(IsolationForestConfig::default());

    let outlier = forest.assess(&[500.0, -300.0, 5.0]).unwrap();
    assert!(outlier.is_anomalous);
    let inlier = forest.assess(&[10.0, 10.0, 5.0]).unwrap();
    assert!(!inlier.is_anomalous);
    assert!(outlier.score > inlier.score);
}

#[test]
fn test_outlier_has_highest_training_score() {
    let data = grid_with_outlier();
    let forest = fitted(IsolationForestConfig::default());
    let result = forest.detect(&data).unwrap();

    let top = result
        .scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(top, data.len() - 1);
    assert!(result.is_anomaly[data.len() - 1]);
}

#[test]
fn test_contamination_bounds_flag_rate() {
    let data = grid_with_outlier();
    let forest = fitted(IsolationForestConfig::new(0.05));
    let flagged = forest.detect(&data).unwrap().anomaly_count();

    // at most the contaminated share, allowing for interpolation
    assert!(flagged >= 1);
    assert!(flagged <= (data.len() as f64 * 0.05).ceil() as usize);
}

#[test]
fn test_same_seed_same_scores() {
    let probe = [3.0, 17.0, 5.0];
    let a = fitted(IsolationForestConfig::default());
    let b = fitted(IsolationForestConfig::default());

    assert_eq!(a.score(&probe).unwrap(), b.score(&probe).unwrap());
    assert_eq!(a.threshold().unwrap(), b.threshold().unwrap());
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_different_trees() {
    let a = fitted(IsolationForestConfig::default());
    let b = fitted(IsolationForestConfig::default().with_seed(7));
    assert_ne!(a.trees(), b.trees());
}

#[test]
fn test_scores_are_in_unit_interval() {
    let forest = fitted(IsolationForestConfig::default().with_trees(20));
    for row in grid_with_outlier() {
        let score = forest.score(&row).unwrap();
        assert!(score > 0.0 && score <= 1.0);
    }
}

#[test]
fn test_sample_size_capped_by_rows() {
    let mut forest = IsolationForest::new(IsolationForestConfig::default().with_max_samples(1000));
    let data: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64]).collect();
    forest.fit(&data).unwrap();
    assert_eq!(forest.sample_size(), 50);
}

#[test]
fn test_constant_data_flags_nothing() {
    let data = vec![vec![1.0, 2.0]; 30];
    let mut forest = IsolationForest::new(IsolationForestConfig::default().with_trees(10));
    forest.fit(&data).unwrap();

    let result = forest.detect(&data).unwrap();
    assert_eq!(result.anomaly_count(), 0);
    assert!((result.scores[0] - 0.5).abs() < 1e-12);
}

#[test]
fn test_dimension_mismatch() {
    let forest = fitted(IsolationForestConfig::default().with_trees(5));
    let err = forest.score(&[1.0, 2.0]).unwrap_err();
    assert_eq!(err, AnomalyError::DimensionMismatch { expected: 3, got: 2 });
}

#[test]
fn test_non_finite_training_row_rejected() {
    let mut data = grid_with_outlier();
    data[3][1] = f64::NAN;
    let mut forest = IsolationForest::default();
    assert_eq!(forest.fit(&data).unwrap_err(), AnomalyError::NonFiniteRow { row: 3 });
}

#[test]
fn test_invalid_config_rejected_on_fit() {
    let mut forest = IsolationForest::new(IsolationForestConfig::new(0.9));
    assert!(matches!(
        forest.fit(&grid_with_outlier()).unwrap_err(),
        AnomalyError::InvalidParameter { .. }
    ));
}

#[test]
fn test_serde_roundtrip_preserves_scores() {
    let forest = fitted(IsolationForestConfig::default().with_trees(25));
    let json = serde_json::to_string(&forest).unwrap();
    let restored: IsolationForest = serde_json::from_str(&json).unwrap();

    let probe = [500.0, -300.0, 5.0];
    assert_eq!(forest.score(&probe).unwrap(), restored.score(&probe).unwrap());
    assert_eq!(forest.threshold().unwrap(), restored.threshold().unwrap());
}
