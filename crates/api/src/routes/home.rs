//! Home, Liveness and User Routes

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use storage::{Page, TripStore, UserCarStore};

use super::cars::UserCarView;
use super::history::{history_items, HistoryItem};
use super::Envelope;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

/// Number of recent trips on the home screen
const RECENT_TRIPS: u32 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub trip_count: i64,
    pub distance_traveled: f64,
    pub fuel_consumed: f64,
}

#[derive(Debug, Serialize)]
pub struct HomeSummary {
    pub stats: HomeStats,
    pub cars: Vec<UserCarView>,
    pub history: Vec<HistoryItem>,
}

/// Liveness
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Fuel cost API is running" }))
}

/// Echo the authenticated user
pub async fn current_user(user: AuthUser) -> Json<Envelope<Value>> {
    Json(Envelope::new(
        "User fetched successfully",
        json!({ "userId": user.user_id() }),
    ))
}

/// Totals, saved cars and the most recent trips
pub async fn home(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Envelope<HomeSummary>>, ApiError> {
    let user_id = user.user_id();
    let repo = &*state.repository;

    let stats = repo.trip_stats(user_id).await?;
    let cars = repo.list_user_cars(user_id, Page::default()).await?;
    let recent = repo.list_trips(user_id, Page::new(0, RECENT_TRIPS)).await?;
    let history = history_items(repo, recent).await?;

    Ok(Json(Envelope::new(
        "Home fetched successfully",
        HomeSummary {
            stats: HomeStats {
                trip_count: stats.trip_count,
                distance_traveled: stats.distance_traveled,
                fuel_consumed: stats.fuel_consumed,
            },
            cars: cars.into_iter().map(UserCarView::from).collect(),
            history,
        },
    )))
}
