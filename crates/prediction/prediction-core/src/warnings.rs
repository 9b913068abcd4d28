//! Human-readable prediction warnings.

use anomaly_core::AnomalyAssessment;
use features_core::RangeViolation;
use features_spi::EncodingNote;

pub fn anomaly(assessment: &AnomalyAssessment) -> String {
    format!(
        "Unusual order profile (anomaly score {:.3} above threshold {:.3}); the estimate may be unreliable",
        assessment.score, assessment.threshold
    )
}

pub fn out_of_range(violation: &RangeViolation) -> String {
    format!(
        "{} = {} is outside the training range [{:.2}, {:.2}]",
        violation.feature, violation.value, violation.lower, violation.upper
    )
}

pub fn unknown_category(note: &EncodingNote) -> String {
    match &note.value {
        Some(value) => format!("Unknown {} '{}' was treated as an unseen category", note.field, value),
        None => format!("No {} given; treated as an unseen category", note.field),
    }
}
