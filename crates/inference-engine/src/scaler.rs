//! Fitted Feature Scaler

use std::path::Path;

use feature_engine::{check_column_order, FeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::InferenceError;

/// Scaling method recorded in the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMethod {
    /// (x - mean) / scale
    Standard,
    /// (x - data_min) / (data_max - data_min)
    MinMax,
}

/// On-disk scaler artifact exported by the training pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
enum ScalerArtifact {
    Standard {
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    MinMax {
        feature_names: Vec<String>,
        data_min: Vec<f64>,
        data_max: Vec<f64>,
    },
}

/// Immutable, fitted per-column affine transform: `(x - offset) / divisor`
#[derive(Debug, Clone)]
pub struct Scaler {
    method: ScalingMethod,
    offsets: [f64; FEATURE_DIMENSION],
    divisors: [f64; FEATURE_DIMENSION],
}

impl Scaler {
    /// Standard scaler from fitted mean and scale
    pub fn standard(
        mean: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    ) -> Result<Self, InferenceError> {
        Self::build(ScalingMethod::Standard, mean, scale)
    }

    /// Min-max scaler from fitted column minima and maxima
    pub fn min_max(
        data_min: [f64; FEATURE_DIMENSION],
        data_max: [f64; FEATURE_DIMENSION],
    ) -> Result<Self, InferenceError> {
        let mut range = [0.0; FEATURE_DIMENSION];
        for i in 0..FEATURE_DIMENSION {
            range[i] = data_max[i] - data_min[i];
        }
        Self::build(ScalingMethod::MinMax, data_min, range)
    }

    /// Load a JSON scaler artifact
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading scaler from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ScalerLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, InferenceError> {
        let artifact: ScalerArtifact = serde_json::from_str(raw)
            .map_err(|e| InferenceError::ScalerLoadError(e.to_string()))?;

        match artifact {
            ScalerArtifact::Standard {
                feature_names,
                mean,
                scale,
            } => {
                check_names(&feature_names)?;
                Self::standard(to_columns("mean", &mean)?, to_columns("scale", &scale)?)
            }
            ScalerArtifact::MinMax {
                feature_names,
                data_min,
                data_max,
            } => {
                check_names(&feature_names)?;
                Self::min_max(
                    to_columns("data_min", &data_min)?,
                    to_columns("data_max", &data_max)?,
                )
            }
        }
    }

    fn build(
        method: ScalingMethod,
        offsets: [f64; FEATURE_DIMENSION],
        mut divisors: [f64; FEATURE_DIMENSION],
    ) -> Result<Self, InferenceError> {
        for (i, (offset, divisor)) in offsets.iter().zip(divisors.iter_mut()).enumerate() {
            if !offset.is_finite() || !divisor.is_finite() {
                return Err(InferenceError::ScalerLoadError(format!(
                    "column {} has non-finite parameters",
                    i
                )));
            }
            // Constant training column: same handling as the fitting library
            if *divisor == 0.0 {
                warn!("Scaler column {} has zero spread, using unit divisor", i);
                *divisor = 1.0;
            }
        }

        Ok(Self {
            method,
            offsets,
            divisors,
        })
    }

    pub fn method(&self) -> ScalingMethod {
        self.method
    }

    /// Scale a raw feature vector into model input
    pub fn transform(&self, features: &FeatureVector) -> [f32; FEATURE_DIMENSION] {
        let mut scaled = [0.0f32; FEATURE_DIMENSION];
        for (i, value) in features.values.iter().enumerate() {
            scaled[i] = ((value - self.offsets[i]) / self.divisors[i]) as f32;
        }
        scaled
    }
}

fn check_names(names: &[String]) -> Result<(), InferenceError> {
    check_column_order(names).map_err(|e| InferenceError::ScalerLoadError(e.to_string()))
}

fn to_columns(field: &str, values: &[f64]) -> Result<[f64; FEATURE_DIMENSION], InferenceError> {
    values
        .try_into()
        .map_err(|_| InferenceError::InvalidInputShape {
            expected: format!("{} with {} values", field, FEATURE_DIMENSION),
            actual: values.len().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &str = r#"["cylinders", "engine_type", "horsepower", "horsepower_rpm",
        "transmission", "tank_capacity", "acceleration", "fuel_grade"]"#;

    fn features() -> FeatureVector {
        FeatureVector {
            values: [6.0, 2.0, 320.0, 5600.0, 1.0, 50.0, 4.9, 1.0],
        }
    }

    #[test]
    fn test_standard_scaling() {
        let scaler = Scaler::standard(
            [4.0, 1.0, 120.0, 5000.0, 0.0, 45.0, 10.0, 1.0],
            [2.0, 1.0, 100.0, 600.0, 1.0, 5.0, 2.0, 1.0],
        )
        .unwrap();

        let scaled = scaler.transform(&features());
        assert_eq!(scaled[0], 1.0);
        assert_eq!(scaled[2], 2.0);
        assert_eq!(scaled[3], 1.0);
        assert_eq!(scaled[5], 1.0);
        assert!((scaled[6] - (-2.55)).abs() < 1e-6);
        assert_eq!(scaled[7], 0.0);
    }

    #[test]
    fn test_min_max_scaling() {
        let scaler = Scaler::min_max(
            [2.0, 0.0, 60.0, 3000.0, 0.0, 30.0, 3.0, 0.0],
            [12.0, 4.0, 700.0, 8200.0, 2.0, 80.0, 20.0, 4.0],
        )
        .unwrap();

        let scaled = scaler.transform(&features());
        assert!((scaled[0] - 0.4).abs() < 1e-6);
        assert!((scaled[2] - 0.40625).abs() < 1e-6);
        assert!((scaled[4] - 0.5).abs() < 1e-6);
        assert!((scaled[7] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_spread_column_uses_unit_divisor() {
        let scaler = Scaler::standard([0.0; 8], [0.0; 8]).unwrap();
        let scaled = scaler.transform(&features());
        assert_eq!(scaled[2], 320.0);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let mut scale = [1.0; 8];
        scale[3] = f64::NAN;
        assert!(matches!(
            Scaler::standard([0.0; 8], scale),
            Err(InferenceError::ScalerLoadError(_))
        ));
    }

    #[test]
    fn test_parse_standard_artifact() {
        let raw = format!(
            r#"{{"method": "standard", "feature_names": {},
                "mean": [0, 0, 0, 0, 0, 0, 0, 0],
                "scale": [1, 1, 1, 1, 1, 1, 1, 1]}}"#,
            NAMES
        );
        let scaler = Scaler::from_json_str(&raw).unwrap();
        assert_eq!(scaler.method(), ScalingMethod::Standard);
        assert_eq!(scaler.transform(&features())[3], 5600.0);
    }

    #[test]
    fn test_parse_min_max_artifact() {
        let raw = format!(
            r#"{{"method": "min_max", "feature_names": {},
                "data_min": [0, 0, 0, 0, 0, 0, 0, 0],
                "data_max": [10, 10, 1000, 10000, 10, 100, 10, 10]}}"#,
            NAMES
        );
        let scaler = Scaler::from_json_str(&raw).unwrap();
        assert_eq!(scaler.method(), ScalingMethod::MinMax);
        assert!((scaler.transform(&features())[5] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_artifact_with_reordered_columns_rejected() {
        let raw = r#"{"method": "standard",
            "feature_names": ["engine_type", "cylinders", "horsepower", "horsepower_rpm",
                "transmission", "tank_capacity", "acceleration", "fuel_grade"],
            "mean": [0, 0, 0, 0, 0, 0, 0, 0],
            "scale": [1, 1, 1, 1, 1, 1, 1, 1]}"#;
        let err = Scaler::from_json_str(raw).unwrap_err();
        assert!(matches!(err, InferenceError::ScalerLoadError(_)));
        assert!(err.to_string().contains("cylinders"));
    }

    #[test]
    fn test_artifact_with_wrong_length_rejected() {
        let raw = format!(
            r#"{{"method": "standard", "feature_names": {},
                "mean": [0, 0, 0],
                "scale": [1, 1, 1, 1, 1, 1, 1, 1]}}"#,
            NAMES
        );
        assert!(matches!(
            Scaler::from_json_str(&raw),
            Err(InferenceError::InvalidInputShape { .. })
        ));
    }
}
