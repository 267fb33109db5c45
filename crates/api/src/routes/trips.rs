//! Cost Calculation Route

use axum::{extract::State, Json};
use data_validator::{TripInput, ValidationError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{FuelGrade, TripRecord, Vehicle};

use super::{cylinder_label, power_label, Envelope};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::workflow::{CarSelection, TripRequest};
use crate::AppState;

/// Body of `POST /calculate-cost`. Exactly one of `userCarId` and `newCar`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateCostRequest {
    pub from: String,
    pub destination: String,
    /// Kilometers
    pub distance: f64,
    pub tolls: bool,
    #[serde(default)]
    pub toll_cost: f64,
    pub user_car_id: Option<i64>,
    pub new_car: Option<NewCarRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCarRequest {
    pub custom_name: Option<String>,
    pub car_id: i64,
    pub fuel_id: i64,
    #[serde(default)]
    pub save_car: bool,
}

/// Stored estimate as returned by `/calculate-cost` and `/history/:id`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResponse {
    pub id: i64,
    pub car_name: String,
    pub car_custom_name: Option<String>,
    pub fuel_type: String,
    pub cylinder: String,
    pub power: String,
    /// km per liter
    pub consumption_rate: f64,
    /// Liters
    pub fuel_needed: f64,
    pub distance: f64,
    pub from: String,
    pub destination: String,
    pub tolls: bool,
    pub fuel_cost: f64,
    pub toll_cost: f64,
    pub total_cost: f64,
    pub created_at_ms: i64,
    /// Present when the request asked to save the car
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_car_id: Option<i64>,
}

impl CostResponse {
    pub fn from_record(record: TripRecord, vehicle: &Vehicle, fuel: &FuelGrade) -> Self {
        Self {
            id: record.id,
            total_cost: record.total_cost(),
            car_name: vehicle.car_name.clone(),
            car_custom_name: record.custom_label,
            fuel_type: fuel.fuel_type.clone(),
            cylinder: cylinder_label(vehicle.cylinders),
            power: power_label(vehicle.horsepower),
            consumption_rate: record.consumption_rate,
            fuel_needed: record.fuel_needed,
            distance: record.distance,
            from: record.origin,
            destination: record.destination,
            tolls: record.tolls,
            fuel_cost: record.fuel_cost,
            toll_cost: record.toll_cost,
            created_at_ms: record.created_at_ms,
            saved_car_id: None,
        }
    }
}

impl CalculateCostRequest {
    fn car_selection(&self) -> Result<CarSelection, ValidationError> {
        match (self.user_car_id, &self.new_car) {
            (Some(user_car_id), None) => Ok(CarSelection::Saved { user_car_id }),
            (None, Some(car)) => Ok(CarSelection::New {
                vehicle_id: car.car_id,
                fuel_id: car.fuel_id,
                custom_name: car.custom_name.clone(),
                save: car.save_car,
            }),
            (Some(_), Some(_)) => Err(ValidationError::Conflict(
                "userCarId and newCar are mutually exclusive".to_string(),
            )),
            (None, None) => Err(ValidationError::MissingField("userCarId or newCar")),
        }
    }
}

/// Estimate fuel and cost for a trip and record it in the caller's history
pub async fn calculate_cost(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<CalculateCostRequest>,
) -> Result<Json<Envelope<CostResponse>>, ApiError> {
    state
        .validator
        .validate_trip(&TripInput {
            distance: body.distance,
            tolls: body.tolls,
            toll_cost: body.toll_cost,
            origin: &body.from,
            destination: &body.destination,
        })
        .into_result()?;

    let car = body.car_selection()?;
    if let CarSelection::New {
        custom_name: Some(name),
        ..
    } = &car
    {
        if !name.trim().is_empty() {
            state.validator.validate_custom_name(name)?;
        }
    }

    let trip = state
        .workflow
        .run(TripRequest {
            user_id: user.user_id().to_string(),
            car,
            distance: body.distance,
            tolls: body.tolls,
            toll_cost: body.toll_cost,
            origin: body.from,
            destination: body.destination,
        })
        .await?;

    let mut response = CostResponse::from_record(trip.record, &trip.vehicle, &trip.fuel);
    response.saved_car_id = trip.saved_car.map(|car| car.id);

    Ok(Json(Envelope::new("Cost calculated successfully", response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(user_car_id: Option<i64>, new_car: Option<NewCarRequest>) -> CalculateCostRequest {
        CalculateCostRequest {
            from: "Jakarta".to_string(),
            destination: "Bandung".to_string(),
            distance: 172.9,
            tolls: false,
            toll_cost: 0.0,
            user_car_id,
            new_car,
        }
    }

    fn new_car() -> NewCarRequest {
        NewCarRequest {
            custom_name: None,
            car_id: 1,
            fuel_id: 1,
            save_car: false,
        }
    }

    #[test]
    fn test_exactly_one_car_source() {
        assert_eq!(
            body(Some(4), None).car_selection(),
            Ok(CarSelection::Saved { user_car_id: 4 })
        );
        assert!(matches!(
            body(None, Some(new_car())).car_selection(),
            Ok(CarSelection::New { vehicle_id: 1, save: false, .. })
        ));
        assert!(matches!(
            body(Some(4), Some(new_car())).car_selection(),
            Err(ValidationError::Conflict(_))
        ));
        assert!(matches!(
            body(None, None).car_selection(),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_request_uses_camel_case() {
        let request: CalculateCostRequest = serde_json::from_str(
            r#"{"from": "Jakarta", "destination": "Bandung", "distance": 172.9,
                "tolls": true, "tollCost": 25500,
                "newCar": {"customName": "Supra Bapak", "carId": 1, "fuelId": 2, "saveCar": true}}"#,
        )
        .unwrap();

        assert_eq!(request.toll_cost, 25_500.0);
        assert!(request.user_car_id.is_none());
        let car = request.new_car.unwrap();
        assert_eq!(car.fuel_id, 2);
        assert!(car.save_car);
    }
}
