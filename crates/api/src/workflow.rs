//! Fuel Cost Workflow
//!
//! Resolve car → assemble features → estimate consumption → project cost →
//! record history. Stateless per invocation; the only shared state is the
//! read-only estimator and the stores.

use std::sync::Arc;
use std::time::Instant;

use cost_projector::{project, EstimationResult, ProjectionError};
use feature_engine::assemble;
use inference_engine::{ConsumptionEstimator, InferenceError};
use metrics::{counter, histogram};
use storage::{
    FuelGrade, NewUserCar, ReferenceStore, StorageError, TripRecord, UserCar, UserCarStore,
    Vehicle,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::recorder::{TripContext, TripHistoryRecorder};

/// Workflow failures, one per error category the API reports
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{0}")]
    NotFound(StorageError),

    #[error("Storage failure: {0}")]
    Storage(StorageError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// The estimate was computed but could not be recorded
    #[error("Estimate computed but not recorded: {source}")]
    Persistence {
        estimate: EstimationResult,
        source: StorageError,
    },
}

impl From<StorageError> for WorkflowError {
    fn from(err: StorageError) -> Self {
        if err.is_not_found() {
            WorkflowError::NotFound(err)
        } else {
            WorkflowError::Storage(err)
        }
    }
}

/// Which car the trip is estimated for
#[derive(Debug, Clone, PartialEq)]
pub enum CarSelection {
    /// A car the user saved earlier
    Saved { user_car_id: i64 },
    /// A catalog vehicle and fuel grade, optionally saved after a successful
    /// estimate
    New {
        vehicle_id: i64,
        fuel_id: i64,
        custom_name: Option<String>,
        save: bool,
    },
}

/// Validated cost calculation request
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub user_id: String,
    pub car: CarSelection,
    pub distance: f64,
    pub tolls: bool,
    pub toll_cost: f64,
    pub origin: String,
    pub destination: String,
}

/// Successful run: the stored record plus the reference data it was built from
#[derive(Debug, Clone)]
pub struct TripEstimate {
    pub record: TripRecord,
    pub estimate: EstimationResult,
    pub vehicle: Vehicle,
    pub fuel: FuelGrade,
    pub saved_car: Option<UserCar>,
}

struct ResolvedCar {
    vehicle_id: i64,
    fuel_id: i64,
    custom_name: Option<String>,
    save: bool,
}

pub struct FuelCostWorkflow {
    reference: Arc<dyn ReferenceStore>,
    user_cars: Arc<dyn UserCarStore>,
    recorder: TripHistoryRecorder,
    estimator: Arc<ConsumptionEstimator>,
}

impl FuelCostWorkflow {
    pub fn new(
        reference: Arc<dyn ReferenceStore>,
        user_cars: Arc<dyn UserCarStore>,
        recorder: TripHistoryRecorder,
        estimator: Arc<ConsumptionEstimator>,
    ) -> Self {
        Self {
            reference,
            user_cars,
            recorder,
            estimator,
        }
    }

    pub fn estimator(&self) -> &ConsumptionEstimator {
        &self.estimator
    }

    /// Run one estimation. Nothing is written unless every step before the
    /// record succeeds; a requested car save follows the record.
    pub async fn run(&self, request: TripRequest) -> Result<TripEstimate, WorkflowError> {
        let start = Instant::now();
        let result = self.run_inner(request).await;

        let outcome = match &result {
            Ok(trip) => {
                info!(
                    "Trip {} estimated in {}ms",
                    trip.record.id,
                    start.elapsed().as_millis()
                );
                "ok"
            }
            Err(WorkflowError::NotFound(_)) => "not_found",
            Err(WorkflowError::Inference(InferenceError::ModelUnavailable(_))) => {
                "model_unavailable"
            }
            Err(WorkflowError::Persistence { .. }) => "not_recorded",
            Err(_) => "error",
        };
        counter!("fuelcost_estimations_total", "outcome" => outcome).increment(1);
        histogram!("fuelcost_estimation_duration_seconds").record(start.elapsed().as_secs_f64());

        result
    }

    async fn run_inner(&self, request: TripRequest) -> Result<TripEstimate, WorkflowError> {
        let car = self.resolve_car(&request.user_id, &request.car).await?;

        let vehicle = self.reference.get_vehicle(car.vehicle_id).await?;
        let fuel = self.reference.get_fuel_grade(car.fuel_id).await?;

        let features = assemble(&vehicle, &fuel);
        let rate = self.estimator.estimate(&features)?;
        let estimate = project(request.distance, rate, fuel.price_per_unit, request.toll_cost)?;
        debug!(
            "User {} trip of {} km with {}: {:.3} km/l, cost {:.2}",
            request.user_id,
            request.distance,
            vehicle.car_name,
            rate,
            estimate.total_cost()
        );

        let custom_name = car
            .custom_name
            .clone()
            .filter(|name| !name.trim().is_empty());

        let trip = TripContext {
            user_id: request.user_id,
            vehicle_id: vehicle.id,
            fuel_id: fuel.id,
            custom_label: custom_name.clone(),
            distance: request.distance,
            origin: request.origin,
            destination: request.destination,
            tolls: request.tolls,
        };

        let record = self
            .recorder
            .record(trip, &estimate)
            .await
            .map_err(|source| WorkflowError::Persistence { estimate, source })?;

        // Only once the trip is on record
        let saved_car = if car.save {
            let name = custom_name.unwrap_or_else(|| vehicle.car_name.clone());
            let saved = self
                .user_cars
                .add_user_car(NewUserCar {
                    user_id: record.user_id.clone(),
                    vehicle_id: vehicle.id,
                    fuel_id: fuel.id,
                    custom_name: name,
                })
                .await?;
            Some(saved)
        } else {
            None
        };

        Ok(TripEstimate {
            record,
            estimate,
            vehicle,
            fuel,
            saved_car,
        })
    }

    async fn resolve_car(
        &self,
        user_id: &str,
        selection: &CarSelection,
    ) -> Result<ResolvedCar, WorkflowError> {
        match selection {
            CarSelection::Saved { user_car_id } => {
                let car = self.user_cars.get_user_car(user_id, *user_car_id).await?;
                Ok(ResolvedCar {
                    vehicle_id: car.vehicle_id,
                    fuel_id: car.fuel_id,
                    custom_name: Some(car.custom_name),
                    save: false,
                })
            }
            CarSelection::New {
                vehicle_id,
                fuel_id,
                custom_name,
                save,
            } => Ok(ResolvedCar {
                vehicle_id: *vehicle_id,
                fuel_id: *fuel_id,
                custom_name: custom_name.clone(),
                save: *save,
            }),
        }
    }
}
