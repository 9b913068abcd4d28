//! Offline training for the delivery time model.
//!
//! Loads the Olist e-commerce CSV export, fits the feature transform, the
//! anomaly scorer and the regressor, and bundles them into a
//! [`ModelArtifact`](artifact::ModelArtifact).

pub mod config;
pub mod dataset;
pub mod error;
pub mod job;

pub use config::TrainingConfig;
pub use dataset::{LoadReport, OlistDataset, DATASET_FILES};
pub use error::{Result, TrainingDataError};
pub use job::TrainingJob;
