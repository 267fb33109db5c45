//! Trip History Routes

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use storage::{ReferenceStore, StorageError, TripRecord, TripStore};

use super::trips::CostResponse;
use super::{Envelope, PageQuery};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

/// One row of the history list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: i64,
    pub car_name: String,
    pub from: String,
    pub destination: String,
    pub fuel_needed: f64,
    pub cost: f64,
    pub created_at_ms: i64,
}

/// Resolve display names for a batch of records, one lookup per vehicle.
pub(crate) async fn history_items(
    reference: &dyn ReferenceStore,
    records: Vec<TripRecord>,
) -> Result<Vec<HistoryItem>, StorageError> {
    let mut names: HashMap<i64, String> = HashMap::new();
    let mut items = Vec::with_capacity(records.len());

    for record in records {
        let car_name = match &record.custom_label {
            Some(label) => label.clone(),
            None => {
                if !names.contains_key(&record.vehicle_id) {
                    let vehicle = reference.get_vehicle(record.vehicle_id).await?;
                    names.insert(vehicle.id, vehicle.car_name);
                }
                names.get(&record.vehicle_id).cloned().unwrap_or_default()
            }
        };

        items.push(HistoryItem {
            id: record.id,
            car_name,
            cost: record.total_cost(),
            fuel_needed: record.fuel_needed,
            from: record.origin,
            destination: record.destination,
            created_at_ms: record.created_at_ms,
        });
    }
    Ok(items)
}

/// The caller's trips, newest first
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(paging): Query<PageQuery>,
) -> Result<Json<Envelope<Vec<HistoryItem>>>, ApiError> {
    let page = paging.to_page(&state.validator)?;
    let records = state.repository.list_trips(user.user_id(), page).await?;
    let items = history_items(&*state.repository, records).await?;

    Ok(Json(Envelope::new("History fetched successfully", items)))
}

/// One of the caller's trips. Other users' trips are reported as not found.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<CostResponse>>, ApiError> {
    let record = state.repository.get_trip(user.user_id(), id).await?;
    let vehicle = state.repository.get_vehicle(record.vehicle_id).await?;
    let fuel = state.repository.get_fuel_grade(record.fuel_id).await?;

    Ok(Json(Envelope::new(
        "History fetched successfully",
        CostResponse::from_record(record, &vehicle, &fuel),
    )))
}
