//! Service readiness report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ready,
    NotReady,
}

/// Readiness and training figures of the loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Featurized training records behind the model.
    pub total_records: usize,
    pub mae: f64,
    pub r2_score: f64,
}

impl HealthReport {
    pub fn ready(total_records: usize, mae: f64, r2_score: f64) -> Self {
        Self {
            status: HealthStatus::Ready,
            total_records,
            mae,
            r2_score,
        }
    }

    /// Report for a service without a model: zeros everywhere.
    pub fn not_ready() -> Self {
        Self {
            status: HealthStatus::NotReady,
            total_records: 0,
            mae: 0.0,
            r2_score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_value(HealthReport::not_ready()).unwrap();
        assert_eq!(json["status"], "not_ready");
        assert_eq!(json["total_records"], 0);

        let json = serde_json::to_value(HealthReport::ready(98_000, 2.1, 0.6)).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["total_records"], 98_000);
    }
}
