//! Shared fixtures for handler and workflow tests

use inference_engine::{ConsumptionEstimator, LinearRegressor, Scaler};
use storage::{FuelGrade, ReferenceSeed, SqliteRepository, Vehicle};

pub const SCALER_JSON: &str = r#"{"method": "standard",
    "feature_names": ["cylinders", "engine_type", "horsepower", "horsepower_rpm",
        "transmission", "tank_capacity", "acceleration", "fuel_grade"],
    "mean": [4, 1, 150, 5500, 1, 45, 10, 1],
    "scale": [1.5, 1, 60, 700, 1, 8, 3, 1]}"#;

pub const MODEL_JSON: &str = r#"{"coefficients": [-1.2, -0.3, -1.8, 0.2, 0.4, -0.5, 0.9, 0.3],
    "intercept": 13.5}"#;

pub fn supra() -> Vehicle {
    Vehicle {
        id: 1,
        maker: "Toyota".to_string(),
        model: "Supra MK4".to_string(),
        car_name: "Toyota Supra MK4".to_string(),
        cylinders: 6,
        engine_type: 2,
        horsepower: 320.0,
        horsepower_rpm: 5600,
        transmission: 1,
        fuel_tank_capacity: 50.0,
        acceleration_0_100: 4.9,
        top_speed_kmh: 250,
        fuel_grade: 1,
        year: 1998,
        car_type: 3,
    }
}

pub fn pertalite() -> FuelGrade {
    FuelGrade {
        id: 1,
        station: "Pertamina".to_string(),
        fuel_type: "Pertalite".to_string(),
        grade_code: 1,
        price_per_unit: 10_000.0,
    }
}

pub async fn seeded_repository() -> SqliteRepository {
    let repo = SqliteRepository::in_memory().await.unwrap();
    let seed = ReferenceSeed {
        vehicles: vec![supra()],
        fuel_grades: vec![pertalite()],
    };
    repo.seed(&seed).await.unwrap();
    repo
}

pub fn linear_estimator() -> ConsumptionEstimator {
    let scaler = Scaler::from_json_str(SCALER_JSON).unwrap();
    let model: LinearRegressor = serde_json::from_str(MODEL_JSON).unwrap();
    ConsumptionEstimator::new(scaler, Box::new(model))
}
