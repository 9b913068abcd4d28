//! Contract definitions for regression models.

mod regressor;

pub use regressor::Regressor;
