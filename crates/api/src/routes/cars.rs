//! Vehicle Catalog and Saved Car Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{FuelGrade, NewUserCar, ReferenceStore, UserCar, UserCarStore, Vehicle};
use tracing::debug;

use super::{cylinder_label, power_label, Envelope, PageQuery};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

/// Query parameters for vehicle search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "super::default_size")]
    pub size: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub id: i64,
    pub car_name: String,
    pub maker: String,
    pub model: String,
    pub year: i64,
    pub cylinder: String,
    pub power: String,
    pub fuel_tank_capacity: f64,
}

impl From<Vehicle> for VehicleView {
    fn from(v: Vehicle) -> Self {
        Self {
            cylinder: cylinder_label(v.cylinders),
            power: power_label(v.horsepower),
            id: v.id,
            car_name: v.car_name,
            maker: v.maker,
            model: v.model,
            year: v.year,
            fuel_tank_capacity: v.fuel_tank_capacity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelView {
    pub id: i64,
    pub station: String,
    pub fuel_type: String,
    pub price: f64,
}

impl From<FuelGrade> for FuelView {
    fn from(f: FuelGrade) -> Self {
        Self {
            id: f.id,
            station: f.station,
            fuel_type: f.fuel_type,
            price: f.price_per_unit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCarView {
    pub id: i64,
    pub custom_name: String,
    pub car_id: i64,
    pub car_name: String,
    pub fuel_id: i64,
    pub fuel_type: String,
}

impl From<UserCar> for UserCarView {
    fn from(c: UserCar) -> Self {
        Self {
            id: c.id,
            custom_name: c.custom_name,
            car_id: c.vehicle_id,
            car_name: c.car_name,
            fuel_id: c.fuel_id,
            fuel_type: c.fuel_type,
        }
    }
}

/// Body of `POST /users-car`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCarRequest {
    pub custom_name: Option<String>,
    pub car_id: i64,
    pub fuel_id: i64,
}

/// Search the vehicle catalog
pub async fn search_cars(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Envelope<Vec<VehicleView>>>, ApiError> {
    let page = PageQuery {
        page: params.page,
        size: params.size,
    }
    .to_page(&state.validator)?;
    let vehicles = state.repository.search_vehicles(params.q.trim(), page).await?;
    debug!("Vehicle search {:?} returned {}", params.q, vehicles.len());

    Ok(Json(Envelope::new(
        "Car list fetched successfully",
        vehicles.into_iter().map(VehicleView::from).collect(),
    )))
}

/// List fuel grades
pub async fn list_fuels(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<Envelope<Vec<FuelView>>>, ApiError> {
    let fuels = state.repository.list_fuel_grades().await?;
    Ok(Json(Envelope::new(
        "Fuel list fetched successfully",
        fuels.into_iter().map(FuelView::from).collect(),
    )))
}

/// List the caller's saved cars
pub async fn list_user_cars(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(paging): Query<PageQuery>,
) -> Result<Json<Envelope<Vec<UserCarView>>>, ApiError> {
    let page = paging.to_page(&state.validator)?;
    let cars = state.repository.list_user_cars(user.user_id(), page).await?;
    Ok(Json(Envelope::new(
        "User's car list fetched successfully",
        cars.into_iter().map(UserCarView::from).collect(),
    )))
}

/// Save a car for the caller. The name defaults to the vehicle's display name.
pub async fn save_user_car(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<SaveCarRequest>,
) -> Result<(StatusCode, Json<Envelope<UserCarView>>), ApiError> {
    let custom_name = match body.custom_name.filter(|name| !name.trim().is_empty()) {
        Some(name) => {
            state.validator.validate_custom_name(&name)?;
            name
        }
        None => state.repository.get_vehicle(body.car_id).await?.car_name,
    };

    let car = state
        .repository
        .add_user_car(NewUserCar {
            user_id: user.user_id().to_string(),
            vehicle_id: body.car_id,
            fuel_id: body.fuel_id,
            custom_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Car saved successfully", car.into())),
    ))
}
