//! Consumption Inference Engine
//!
//! Loads a fitted feature scaler and a trained regression model once at
//! startup and predicts fuel consumption (km per liter) from a feature vector.

mod engine;
mod regressor;
mod scaler;

pub use engine::{ConsumptionEstimator, EstimatorStatus};
pub use regressor::{LinearRegressor, OnnxRegressor, Regressor};
pub use scaler::{Scaler, ScalingMethod};

use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Resources failed to load at startup; every estimate fails until restart
    #[error("Consumption model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Scaler load failed: {0}")]
    ScalerLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
}
