//! Contract definitions for the prediction service.

mod delivery_predictor;

pub use delivery_predictor::DeliveryPredictor;
