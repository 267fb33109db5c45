//! Storage Layer
//!
//! SQLite persistence for the vehicle/fuel reference catalog, users' saved
//! cars and the append-only trip history.

mod records;
mod repository;
mod seed;

pub use records::{
    FuelGrade, NewTripRecord, NewUserCar, Page, TripRecord, TripStats, UserCar, Vehicle,
};
pub use repository::SqliteRepository;
pub use seed::{load_seed_file, ReferenceSeed};

use async_trait::async_trait;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Vehicle {0} not found")]
    VehicleNotFound(i64),
    #[error("Fuel grade {0} not found")]
    FuelGradeNotFound(i64),
    #[error("Trip record {0} not found")]
    TripNotFound(i64),
    #[error("User car {0} not found")]
    UserCarNotFound(i64),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StorageError {
    /// Whether the error means a referenced record does not exist (or is not
    /// visible to the requesting user).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::VehicleNotFound(_)
                | StorageError::FuelGradeNotFound(_)
                | StorageError::TripNotFound(_)
                | StorageError::UserCarNotFound(_)
        )
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

/// Read-only lookup of vehicle and fuel-grade reference data.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn get_vehicle(&self, id: i64) -> Result<Vehicle, StorageError>;

    async fn get_fuel_grade(&self, id: i64) -> Result<FuelGrade, StorageError>;

    /// Case-insensitive substring search over display name, maker and model.
    /// An empty query lists everything.
    async fn search_vehicles(&self, query: &str, page: Page) -> Result<Vec<Vehicle>, StorageError>;

    async fn list_fuel_grades(&self) -> Result<Vec<FuelGrade>, StorageError>;
}

/// Append-only trip history, scoped per user.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Persist one record atomically and return it with its generated id.
    async fn insert_trip(&self, record: NewTripRecord) -> Result<TripRecord, StorageError>;

    /// Fetch a record owned by `user_id`. Records of other users are reported
    /// as not found.
    async fn get_trip(&self, user_id: &str, id: i64) -> Result<TripRecord, StorageError>;

    /// Newest first.
    async fn list_trips(&self, user_id: &str, page: Page) -> Result<Vec<TripRecord>, StorageError>;

    async fn trip_stats(&self, user_id: &str) -> Result<TripStats, StorageError>;
}

/// Cars saved by a user under a custom name.
#[async_trait]
pub trait UserCarStore: Send + Sync {
    async fn add_user_car(&self, car: NewUserCar) -> Result<UserCar, StorageError>;

    async fn get_user_car(&self, user_id: &str, id: i64) -> Result<UserCar, StorageError>;

    async fn list_user_cars(&self, user_id: &str, page: Page) -> Result<Vec<UserCar>, StorageError>;
}
