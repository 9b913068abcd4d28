//! Held-out accuracy of a delivery-days regressor.
//!
//! Every metric returns NaN when the two slices differ in length or are empty.

use regressor_spi::EvaluationMetrics;

fn paired<'a>(actual: &'a [f64], predicted: &'a [f64]) -> Option<impl Iterator<Item = f64> + 'a> {
    (actual.len() == predicted.len() && !actual.is_empty())
        .then(|| actual.iter().zip(predicted).map(|(a, p)| a - p))
}

/// Mean absolute error, in days.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    match paired(actual, predicted) {
        Some(residuals) => residuals.map(f64::abs).sum::<f64>() / actual.len() as f64,
        None => f64::NAN,
    }
}

pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    match paired(actual, predicted) {
        Some(residuals) => residuals.map(|r| r * r).sum::<f64>() / actual.len() as f64,
        None => f64::NAN,
    }
}

pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Coefficient of determination.
///
/// A constant `actual` series scores 1.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    let Some(residuals) = paired(actual, predicted) else {
        return f64::NAN;
    };
    let ss_res: f64 = residuals.map(|r| r * r).sum();

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot < 1e-10 {
        return 1.0;
    }
    1.0 - ss_res / ss_tot
}

/// Share of orders whose estimate misses by strictly less than `tolerance` days.
pub fn within_tolerance(actual: &[f64], predicted: &[f64], tolerance: f64) -> f64 {
    match paired(actual, predicted) {
        Some(residuals) => {
            residuals.filter(|r| r.abs() < tolerance).count() as f64 / actual.len() as f64
        }
        None => f64::NAN,
    }
}

pub fn evaluate(actual: &[f64], predicted: &[f64], tolerance_days: f64) -> EvaluationMetrics {
    EvaluationMetrics {
        mae: mae(actual, predicted),
        rmse: rmse(actual, predicted),
        r2_score: r_squared(actual, predicted),
        business_accuracy: within_tolerance(actual, predicted, tolerance_days),
        test_records: actual.len(),
        best_iteration: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_prediction() {
        let actual = vec![4.0, 9.0, 15.0];
        assert_eq!(mae(&actual, &actual), 0.0);
        assert_eq!(rmse(&actual, &actual), 0.0);
        assert_eq!(r_squared(&actual, &actual), 1.0);
        assert_eq!(within_tolerance(&actual, &actual, 3.0), 1.0);
    }

    #[test]
    fn test_known_values() {
        let actual = vec![10.0, 20.0, 30.0, 40.0];
        let predicted = vec![12.0, 18.0, 34.0, 40.0];
        assert_eq!(mae(&actual, &predicted), 2.0);
        assert_eq!(mse(&actual, &predicted), 6.0);
        assert!((rmse(&actual, &predicted) - 6f64.sqrt()).abs() < 1e-12);
        // ss_tot = 500, ss_res = 24
        assert!((r_squared(&actual, &predicted) - (1.0 - 24.0 / 500.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_is_strict() {
        let actual = vec![10.0, 10.0, 10.0, 10.0];
        let predicted = vec![12.9, 13.0, 7.5, 20.0];
        assert_eq!(within_tolerance(&actual, &predicted, 3.0), 0.5);
    }

    #[test]
    fn test_mismatched_lengths_are_nan() {
        assert!(mae(&[1.0], &[]).is_nan());
        assert!(r_squared(&[], &[]).is_nan());
        assert!(within_tolerance(&[1.0, 2.0], &[1.0], 3.0).is_nan());
    }

    #[test]
    fn test_evaluate_bundles_metrics() {
        let metrics = evaluate(&[5.0, 10.0], &[6.0, 14.0], 3.0);
        assert_eq!(metrics.mae, 2.5);
        assert_eq!(metrics.business_accuracy, 0.5);
        assert_eq!(metrics.test_records, 2);
        assert_eq!(metrics.best_iteration, None);
    }
}
