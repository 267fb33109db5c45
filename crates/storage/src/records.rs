//! Record Types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehicle reference record. Seeded administratively, never mutated by
/// request handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub maker: String,
    pub model: String,
    /// Display name
    pub car_name: String,
    pub cylinders: i64,
    /// Encoded engine type (training-time category code)
    pub engine_type: i64,
    pub horsepower: f64,
    /// RPM at which peak horsepower is reached
    pub horsepower_rpm: i64,
    /// Encoded transmission type
    pub transmission: i64,
    /// Tank capacity (liters)
    pub fuel_tank_capacity: f64,
    /// 0-100 km/h time (seconds)
    pub acceleration_0_100: f64,
    pub top_speed_kmh: i64,
    /// Recommended fuel grade code
    pub fuel_grade: i64,
    pub year: i64,
    /// Encoded body type
    pub car_type: i64,
}

/// Fuel grade sold at a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FuelGrade {
    pub id: i64,
    pub station: String,
    /// Label shown to users, e.g. "Pertalite"
    pub fuel_type: String,
    /// Encoded grade used as a model feature
    pub grade_code: i64,
    /// Price per liter
    pub price_per_unit: f64,
}

/// Trip history record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TripRecord {
    pub id: i64,
    pub user_id: String,
    pub vehicle_id: i64,
    pub fuel_id: i64,
    pub custom_label: Option<String>,
    /// Predicted km per liter
    pub consumption_rate: f64,
    /// Liters
    pub fuel_needed: f64,
    /// Kilometers
    pub distance: f64,
    pub origin: String,
    pub destination: String,
    pub tolls: bool,
    pub fuel_cost: f64,
    pub toll_cost: f64,
    pub created_at_ms: i64,
}

impl TripRecord {
    /// Total cost is derived at read time, never stored.
    pub fn total_cost(&self) -> f64 {
        self.fuel_cost + self.toll_cost
    }
}

/// Trip record before it has been persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTripRecord {
    pub user_id: String,
    pub vehicle_id: i64,
    pub fuel_id: i64,
    pub custom_label: Option<String>,
    pub consumption_rate: f64,
    pub fuel_needed: f64,
    pub distance: f64,
    pub origin: String,
    pub destination: String,
    pub tolls: bool,
    pub fuel_cost: f64,
    pub toll_cost: f64,
}

impl NewTripRecord {
    pub(crate) fn into_persisted(self, id: i64, created_at_ms: i64) -> TripRecord {
        TripRecord {
            id,
            user_id: self.user_id,
            vehicle_id: self.vehicle_id,
            fuel_id: self.fuel_id,
            custom_label: self.custom_label,
            consumption_rate: self.consumption_rate,
            fuel_needed: self.fuel_needed,
            distance: self.distance,
            origin: self.origin,
            destination: self.destination,
            tolls: self.tolls,
            fuel_cost: self.fuel_cost,
            toll_cost: self.toll_cost,
            created_at_ms,
        }
    }
}

/// A car saved by a user, joined with its reference names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserCar {
    pub id: i64,
    pub user_id: String,
    pub vehicle_id: i64,
    pub fuel_id: i64,
    pub custom_name: String,
    pub car_name: String,
    pub fuel_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserCar {
    pub user_id: String,
    pub vehicle_id: i64,
    pub fuel_id: i64,
    pub custom_name: String,
}

/// Aggregates over a user's trip history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TripStats {
    pub trip_count: i64,
    pub distance_traveled: f64,
    pub fuel_consumed: f64,
}

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub size: u32,
}

impl Page {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}
