//! Data models for the prediction service.

mod health;
mod request;
mod response;
mod stage;

pub use health::{HealthReport, HealthStatus};
pub use request::{PredictionRequest, ZipCode};
pub use response::PredictionResponse;
pub use stage::RequestStage;
