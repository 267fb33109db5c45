//! Trip History Recorder

use std::sync::Arc;

use cost_projector::EstimationResult;
use storage::{NewTripRecord, StorageError, TripRecord, TripStore};
use tracing::{info, warn};

/// Trip metadata echoed into the history record
#[derive(Debug, Clone)]
pub struct TripContext {
    pub user_id: String,
    pub vehicle_id: i64,
    pub fuel_id: i64,
    pub custom_label: Option<String>,
    pub distance: f64,
    pub origin: String,
    pub destination: String,
    pub tolls: bool,
}

/// Persists completed estimations, one immutable record per trip.
#[derive(Clone)]
pub struct TripHistoryRecorder {
    store: Arc<dyn TripStore>,
}

impl TripHistoryRecorder {
    pub fn new(store: Arc<dyn TripStore>) -> Self {
        Self { store }
    }

    /// Write one record. Either the whole record is stored or nothing is.
    pub async fn record(
        &self,
        trip: TripContext,
        estimate: &EstimationResult,
    ) -> Result<TripRecord, StorageError> {
        let user_id = trip.user_id.clone();
        let record = NewTripRecord {
            user_id: trip.user_id,
            vehicle_id: trip.vehicle_id,
            fuel_id: trip.fuel_id,
            custom_label: trip.custom_label,
            consumption_rate: estimate.consumption_rate,
            fuel_needed: estimate.total_fuel,
            distance: trip.distance,
            origin: trip.origin,
            destination: trip.destination,
            tolls: trip.tolls,
            fuel_cost: estimate.fuel_cost,
            toll_cost: estimate.toll_cost,
        };

        match self.store.insert_trip(record).await {
            Ok(stored) => {
                info!("Recorded trip {} for user {}", stored.id, user_id);
                Ok(stored)
            }
            Err(e) => {
                warn!("Failed to record trip for user {}: {}", user_id, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_repository;

    #[tokio::test]
    async fn test_recorded_trip_reads_back_exactly() {
        let repo = Arc::new(seeded_repository().await);
        let recorder = TripHistoryRecorder::new(repo.clone());
        let estimate = EstimationResult {
            consumption_rate: 11.5,
            total_fuel: 172.9 / 11.5,
            fuel_cost: 172.9 / 11.5 * 10_000.0,
            toll_cost: 0.0,
        };
        let trip = TripContext {
            user_id: "user-1".to_string(),
            vehicle_id: 1,
            fuel_id: 1,
            custom_label: Some("Supra Bapak".to_string()),
            distance: 172.9,
            origin: "Jakarta".to_string(),
            destination: "Bandung".to_string(),
            tolls: false,
        };

        let stored = recorder.record(trip, &estimate).await.unwrap();
        let read = repo.get_trip("user-1", stored.id).await.unwrap();

        assert_eq!(read, stored);
        assert_eq!(read.fuel_needed.to_bits(), estimate.total_fuel.to_bits());
        assert_eq!(read.fuel_cost.to_bits(), estimate.fuel_cost.to_bits());
        assert_eq!(read.custom_label.as_deref(), Some("Supra Bapak"));
        assert_eq!(read.total_cost(), estimate.total_cost());
    }
}
