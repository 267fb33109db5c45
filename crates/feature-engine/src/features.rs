//! Feature Vector Assembly

use serde::{Deserialize, Serialize};
use storage::{FuelGrade, Vehicle};
use thiserror::Error;
use tracing::debug;

/// Number of features the consumption model consumes
pub const FEATURE_DIMENSION: usize = 8;

/// Column order shared with the training pipeline. Scaler artifacts list
/// their column names and must match this exactly.
pub const FEATURE_ORDER: [Feature; FEATURE_DIMENSION] = [
    Feature::Cylinders,
    Feature::EngineType,
    Feature::Horsepower,
    Feature::HorsepowerRpm,
    Feature::Transmission,
    Feature::TankCapacity,
    Feature::Acceleration,
    Feature::FuelGrade,
];

/// One model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Cylinders,
    EngineType,
    Horsepower,
    HorsepowerRpm,
    Transmission,
    TankCapacity,
    Acceleration,
    FuelGrade,
}

impl Feature {
    /// Column name as written by the training pipeline
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Cylinders => "cylinders",
            Feature::EngineType => "engine_type",
            Feature::Horsepower => "horsepower",
            Feature::HorsepowerRpm => "horsepower_rpm",
            Feature::Transmission => "transmission",
            Feature::TankCapacity => "tank_capacity",
            Feature::Acceleration => "acceleration",
            Feature::FuelGrade => "fuel_grade",
        }
    }

    /// Position in the feature vector
    pub fn index(&self) -> usize {
        match self {
            Feature::Cylinders => 0,
            Feature::EngineType => 1,
            Feature::Horsepower => 2,
            Feature::HorsepowerRpm => 3,
            Feature::Transmission => 4,
            Feature::TankCapacity => 5,
            Feature::Acceleration => 6,
            Feature::FuelGrade => 7,
        }
    }
}

/// Errors when an external artifact disagrees with the feature layout
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeatureError {
    #[error("Expected {expected} feature columns, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Column {index} is {actual:?}, expected {expected:?}")]
    ColumnMismatch {
        index: usize,
        expected: &'static str,
        actual: String,
    },
}

/// Check that `names` lists the feature columns in training order.
pub fn check_column_order<S: AsRef<str>>(names: &[S]) -> Result<(), FeatureError> {
    if names.len() != FEATURE_DIMENSION {
        return Err(FeatureError::DimensionMismatch {
            expected: FEATURE_DIMENSION,
            actual: names.len(),
        });
    }

    for (index, (feature, name)) in FEATURE_ORDER.iter().zip(names).enumerate() {
        if feature.name() != name.as_ref() {
            return Err(FeatureError::ColumnMismatch {
                index,
                expected: feature.name(),
                actual: name.as_ref().to_string(),
            });
        }
    }

    Ok(())
}

/// Feature vector for one vehicle + fuel grade combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw (unscaled) values in [`FEATURE_ORDER`]
    pub values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }
}

/// Assemble the model input for a vehicle running on a given fuel grade.
///
/// The fuel grade column comes from the selected fuel, not from the vehicle's
/// recommended grade.
pub fn assemble(vehicle: &Vehicle, fuel: &FuelGrade) -> FeatureVector {
    let mut values = [0.0; FEATURE_DIMENSION];

    for feature in FEATURE_ORDER {
        values[feature.index()] = match feature {
            Feature::Cylinders => vehicle.cylinders as f64,
            Feature::EngineType => vehicle.engine_type as f64,
            Feature::Horsepower => vehicle.horsepower,
            Feature::HorsepowerRpm => vehicle.horsepower_rpm as f64,
            Feature::Transmission => vehicle.transmission as f64,
            Feature::TankCapacity => vehicle.fuel_tank_capacity,
            Feature::Acceleration => vehicle.acceleration_0_100,
            Feature::FuelGrade => fuel.grade_code as f64,
        };
    }

    debug!(
        "Assembled features for vehicle {} / fuel {}: {:?}",
        vehicle.id, fuel.id, values
    );

    FeatureVector { values }
}
