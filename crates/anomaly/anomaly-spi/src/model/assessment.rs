//! Single-sample anomaly assessment.

use serde::{Deserialize, Serialize};

/// Score of one sample against the detector threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAssessment {
    pub score: f64,
    pub threshold: f64,
    pub is_anomalous: bool,
}

impl AnomalyAssessment {
    pub fn new(score: f64, threshold: f64) -> Self {
        Self {
            score,
            threshold,
            is_anomalous: score > threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_strictly_above_threshold() {
        assert!(AnomalyAssessment::new(0.71, 0.62).is_anomalous);
        assert!(!AnomalyAssessment::new(0.62, 0.62).is_anomalous);
        assert!(!AnomalyAssessment::new(0.40, 0.62).is_anomalous);
    }
}
