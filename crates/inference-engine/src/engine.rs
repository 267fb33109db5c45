//! Consumption Estimator

use std::path::Path;
use std::time::Instant;

use feature_engine::FeatureVector;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::regressor::{load_regressor, Regressor};
use crate::scaler::Scaler;
use crate::InferenceError;

enum EstimatorState {
    Ready {
        scaler: Scaler,
        model: Box<dyn Regressor>,
    },
    Unavailable {
        reason: String,
    },
}

/// Health view of the estimator
#[derive(Debug, Clone, Serialize)]
pub struct EstimatorStatus {
    pub available: bool,
    pub backend: Option<&'static str>,
    pub reason: Option<String>,
}

/// Owns the scaler and regression model for the process lifetime. Both are
/// immutable after construction, so a shared reference can serve concurrent
/// requests without locking.
pub struct ConsumptionEstimator {
    state: EstimatorState,
}

impl ConsumptionEstimator {
    /// Build from already-loaded resources
    pub fn new(scaler: Scaler, model: Box<dyn Regressor>) -> Self {
        info!(
            "Consumption estimator ready ({:?} scaling, {} backend)",
            scaler.method(),
            model.backend()
        );
        Self {
            state: EstimatorState::Ready { scaler, model },
        }
    }

    /// Estimator whose resources are missing; every estimate fails.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!("Consumption estimator unavailable: {}", reason);
        Self {
            state: EstimatorState::Unavailable { reason },
        }
    }

    /// Load the scaler (JSON) and model (`.onnx` or `.json`) from disk.
    pub fn load(
        scaler_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, InferenceError> {
        let scaler = Scaler::from_json_file(scaler_path)?;
        let model = load_regressor(model_path.as_ref())?;
        Ok(Self::new(scaler, model))
    }

    /// Like [`ConsumptionEstimator::load`], but a failure yields an
    /// unavailable estimator so the rest of the service keeps running.
    pub fn load_or_unavailable(scaler_path: impl AsRef<Path>, model_path: impl AsRef<Path>) -> Self {
        match Self::load(scaler_path, model_path) {
            Ok(estimator) => estimator,
            Err(e) => {
                error!("Failed to load consumption model resources: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Predict the consumption rate (km per liter) for a feature vector.
    pub fn estimate(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let (scaler, model) = match &self.state {
            EstimatorState::Ready { scaler, model } => (scaler, model),
            EstimatorState::Unavailable { reason } => {
                return Err(InferenceError::ModelUnavailable(reason.clone()));
            }
        };

        let start = Instant::now();
        let scaled = scaler.transform(features);
        let rate = model.predict(&scaled)?;

        if !rate.is_finite() || rate <= 0.0 {
            warn!("Model produced degenerate consumption rate {} for {:?}", rate, features.values);
        }
        debug!(
            "Estimated {:.4} km/l in {}us",
            rate,
            start.elapsed().as_micros()
        );
        Ok(rate)
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, EstimatorState::Ready { .. })
    }

    pub fn status(&self) -> EstimatorStatus {
        match &self.state {
            EstimatorState::Ready { model, .. } => EstimatorStatus {
                available: true,
                backend: Some(model.backend()),
                reason: None,
            },
            EstimatorState::Unavailable { reason } => EstimatorStatus {
                available: false,
                backend: None,
                reason: Some(reason.clone()),
            },
        }
    }
}
