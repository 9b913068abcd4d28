//! Request lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stages a prediction request moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStage {
    Received,
    Validated,
    Featurized,
    Scored,
    Responded,
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Featurized => "featurized",
            Self::Scored => "scored",
            Self::Responded => "responded",
        };
        f.write_str(name)
    }
}
