// src/routes/trips.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::dispatch::{self, NewTrip};
use crate::models::{DriverTrip, TransportationRequest, TripStatus};
use crate::routes::engine_error;
use crate::AppState;

/// Missing required fields are silently ignored, matching the shift
/// scheduler's create contract.
pub async fn create_trip(State(state): State<AppState>, Json(b): Json<NewTrip>) -> Json<Value> {
    let mut store = state.store.write().await;
    match dispatch::add_driver_trip(&mut store, b) {
        Some(trip) => Json(json!(trip)),
        None => Json(json!({"created": false})),
    }
}

pub async fn list_trips(State(state): State<AppState>) -> Json<Vec<DriverTrip>> {
    let store = state.store.read().await;
    Json(store.trips.clone())
}

#[derive(Deserialize)]
pub struct AssignTripBody {
    pub driver_id: i64,
    pub vehicle_id: i64,
}

pub async fn assign_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<AssignTripBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    match dispatch::assign_driver_to_trip(&mut store, id, b.driver_id, b.vehicle_id) {
        Ok(trip) => Ok(Json(json!(trip))),
        Err(e) => engine_error(e),
    }
}

#[derive(Deserialize)]
pub struct TripStatusBody {
    pub status: TripStatus,
}

pub async fn patch_trip_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<TripStatusBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    match dispatch::update_trip_status(&mut store, id, b.status, Utc::now()) {
        Ok(trip) => Ok(Json(json!(trip))),
        Err(e) => engine_error(e),
    }
}

pub async fn cancel_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    match dispatch::cancel_trip(&mut store, id) {
        Ok(trip) => Ok(Json(json!(trip))),
        Err(e) => engine_error(e),
    }
}

pub async fn list_transport_requests(
    State(state): State<AppState>,
) -> Json<Vec<TransportationRequest>> {
    let store = state.store.read().await;
    Json(store.transport_requests.clone())
}

pub async fn convert_request(State(state): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    let mut store = state.store.write().await;
    match dispatch::convert_request_to_trip(&mut store, id) {
        Some(trip) => Json(json!(trip)),
        None => Json(json!({"converted": false})),
    }
}

pub async fn reject_request(State(state): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    let mut store = state.store.write().await;
    let rejected = dispatch::reject_request(&mut store, id);
    Json(json!({"rejected": rejected}))
}
