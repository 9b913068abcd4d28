//! Prediction Facade
//!
//! Unified re-exports for the prediction service:
//! - Request, response and health models plus `DeliveryPredictor` from SPI
//! - `PredictionService` and request validation from Core

// Re-export everything from SPI
pub use prediction_spi::*;

// Re-export everything from Core
pub use prediction_core::*;
