// src/routes/vehicles.rs

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::dispatch;
use crate::models::{Vehicle, VehicleStatus};
use crate::AppState;

pub async fn list_vehicles(State(state): State<AppState>) -> Json<Vec<Vehicle>> {
    let store = state.store.read().await;
    Json(store.vehicles.clone())
}

#[derive(Deserialize)]
pub struct VehicleStatusBody {
    pub status: VehicleStatus,
}

pub async fn patch_vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<VehicleStatusBody>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match dispatch::update_vehicle_status(&mut store, id, b.status) {
        Some(vehicle) => Json(json!(vehicle)),
        None => Json(json!({"updated": false})),
    }
}
