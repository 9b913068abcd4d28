//! Featurizer trait definition.

use crate::error::Result;
use crate::model::{FeatureInput, FeatureSchema, Featurized};

/// Turns a validated inference payload into a [`crate::FeatureVector`].
///
/// Implementations are frozen after training: featurizing never mutates
/// state, so a single instance can be shared across request handlers.
pub trait Featurizer: Send + Sync {
    /// Featurize a single request.
    fn featurize(&self, input: &FeatureInput) -> Result<Featurized>;

    /// Schema of the vectors this featurizer produces.
    fn schema(&self) -> FeatureSchema;
}
