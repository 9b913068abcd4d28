//! Contract definitions for feature engineering.

mod featurizer;

pub use featurizer::Featurizer;
