//! Olist e-commerce dataset loading.

mod loader;
mod rows;

pub use loader::{LoadReport, OlistDataset, DATASET_FILES};
