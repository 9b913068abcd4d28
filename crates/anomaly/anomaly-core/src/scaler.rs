//! Per-feature standardization.

use anomaly_spi::{AnomalyError, Result};
use serde::{Deserialize, Serialize};

/// Scales each feature to zero mean and unit variance.
///
/// Constant features map to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        let first = data.first().ok_or(AnomalyError::InsufficientData {
            required: 1,
            got: 0,
        })?;
        let dims = first.len();
        for row in data {
            if row.len() != dims {
                return Err(AnomalyError::DimensionMismatch {
                    expected: dims,
                    got: row.len(),
                });
            }
        }

        let n = data.len() as f64;
        let means: Vec<f64> = (0..dims)
            .map(|j| data.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let std_devs = (0..dims)
            .map(|j| {
                let mean = means[j];
                (data.iter().map(|row| (row[j] - mean).powi(2)).sum::<f64>() / n).sqrt()
            })
            .collect();

        self.means = means;
        self.std_devs = std_devs;
        Ok(())
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(AnomalyError::NotFitted);
        }
        if row.len() != self.means.len() {
            return Err(AnomalyError::DimensionMismatch {
                expected: self.means.len(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.std_devs))
            .map(|(&x, (&mean, &std_dev))| {
                if std_dev == 0.0 {
                    0.0
                } else {
                    (x - mean) / std_dev
                }
            })
            .collect())
    }

    pub fn is_fitted(&self) -> bool {
        !self.means.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform() {
        let data = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(&data).unwrap();

        assert_eq!(scaler.means(), &[2.0, 10.0]);
        assert_eq!(scaler.std_devs(), &[1.0, 0.0]);
        assert_eq!(scaler.transform(&[3.0, 99.0]).unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_transform_before_fit() {
        let scaler = StandardScaler::new();
        assert_eq!(scaler.transform(&[1.0]).unwrap_err(), AnomalyError::NotFitted);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut scaler = StandardScaler::new();
        let err = scaler.fit(&[vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, AnomalyError::DimensionMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn test_empty_fit_rejected() {
        let mut scaler = StandardScaler::new();
        assert!(matches!(
            scaler.fit(&[]).unwrap_err(),
            AnomalyError::InsufficientData { .. }
        ));
    }
}
