//! Trained model artifact.
//!
//! A [`ModelArtifact`] is written once per training run and loaded read-only
//! by the prediction service. The JSON file carries a format version and the
//! feature schema, both checked before the rest of the bundle is decoded.

mod error;
mod model;
mod store;

pub use error::{ArtifactLoadError, ArtifactSaveError};
pub use model::{ModelArtifact, TrainingSummary, FORMAT_VERSION};
