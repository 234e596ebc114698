// src/routes/metrics.rs
//
// Read-only recomputation endpoints. Each handler takes one read lock,
// derives from that single snapshot, and returns.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::engine::metrics;
use crate::models::{DepartmentMetrics, DriverMetrics, HousekeepingMetrics};
use crate::AppState;

pub async fn department_metrics(State(state): State<AppState>) -> Json<Vec<DepartmentMetrics>> {
    let store = state.store.read().await;
    Json(metrics::department_metrics(&store))
}

pub async fn housekeeping_metrics(State(state): State<AppState>) -> Json<HousekeepingMetrics> {
    let store = state.store.read().await;
    Json(metrics::housekeeping_metrics(&store))
}

pub async fn driver_metrics(State(state): State<AppState>) -> Json<DriverMetrics> {
    let store = state.store.read().await;
    Json(metrics::driver_metrics(&store, Utc::now()))
}
