//! Regression Model Backends

use std::path::Path;

use feature_engine::FEATURE_DIMENSION;
use serde::Deserialize;
use tracing::info;
use tract_onnx::prelude::*;

use crate::InferenceError;

/// Trained single-output regression model. Takes scaled input, returns the
/// predicted consumption rate.
pub trait Regressor: Send + Sync {
    fn predict(&self, scaled: &[f32; FEATURE_DIMENSION]) -> Result<f64, InferenceError>;

    /// Backend name for logs and health output
    fn backend(&self) -> &'static str;
}

/// ONNX model executed with tract. Expects input `[1, 8]` f32 and a single
/// scalar output.
pub struct OnnxRegressor {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxRegressor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let plan = Self::build_plan(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        info!("ONNX model loaded successfully");
        Ok(Self { plan })
    }

    fn build_plan(path: &Path) -> TractResult<TypedRunnableModel<TypedModel>> {
        tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_DIMENSION)),
            )?
            .into_optimized()?
            .into_runnable()
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, scaled: &[f32; FEATURE_DIMENSION]) -> Result<f64, InferenceError> {
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, FEATURE_DIMENSION), scaled.to_vec())
            .map_err(|e| InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", FEATURE_DIMENSION),
                actual: e.to_string(),
            })?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        view.iter()
            .next()
            .map(|v| f64::from(*v))
            .ok_or_else(|| InferenceError::InferenceFailed("empty model output".to_string()))
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}

/// Linear regression exported as JSON: `{"coefficients": [8 values], "intercept": x}`
#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: [f64; FEATURE_DIMENSION],
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: [f64; FEATURE_DIMENSION], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading linear model from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;

        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::ModelLoadError(format!(
                "{}: non-finite parameters",
                path.display()
            )));
        }
        Ok(model)
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, scaled: &[f32; FEATURE_DIMENSION]) -> Result<f64, InferenceError> {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(scaled.iter())
            .map(|(c, x)| c * f64::from(*x))
            .sum();
        Ok(self.intercept + dot)
    }

    fn backend(&self) -> &'static str {
        "linear"
    }
}

/// Pick a backend from the artifact extension (`.onnx` or `.json`).
pub(crate) fn load_regressor(path: &Path) -> Result<Box<dyn Regressor>, InferenceError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("onnx") => Ok(Box::new(OnnxRegressor::load(path)?)),
        Some("json") => Ok(Box::new(LinearRegressor::from_json_file(path)?)),
        _ => Err(InferenceError::ModelLoadError(format!(
            "{}: unsupported model format (expected .onnx or .json)",
            path.display()
        ))),
    }
}
