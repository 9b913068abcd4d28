//! Regressor Facade
//!
//! Unified re-exports for the regression module.

// Re-export everything from SPI
pub use regressor_spi::*;

// Re-export everything from API
pub use regressor_api::*;

// Re-export everything from Core
pub use regressor_core::*;
