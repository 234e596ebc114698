// src/routes/assistant.rs
//
// Flat key/value snapshot handed to the voice/chat assistant. The
// assistant is a pure consumer: it gets these numbers and returns
// text, with no mutation access.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::engine::metrics;
use crate::AppState;

pub async fn context_data(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.read().await;
    let now = Utc::now();
    let hk = metrics::housekeeping_metrics(&store);
    let drivers = metrics::driver_metrics(&store, now);
    let on_duty = store
        .employees
        .iter()
        .filter(|e| e.status == crate::models::EmployeeStatus::OnDuty)
        .count();

    Json(json!({
        "employees_total": store.employees.len(),
        "employees_on_duty": on_duty,
        "rooms_total": hk.total_rooms,
        "rooms_dirty": hk.dirty,
        "rooms_cleaned_today": hk.rooms_cleaned_today,
        "rooms_out_of_order": hk.out_of_order,
        "housekeeping_quality_score": hk.quality_score,
        "vehicles_available": drivers.available_vehicles,
        "vehicles_in_use": drivers.vehicles_in_use,
        "trips_pending": drivers.pending_trips,
        "trips_active": drivers.active_trips,
        "trips_completed_today": drivers.completed_today,
        "on_time_rate": drivers.on_time_rate,
        "revenue_today": drivers.revenue_today,
        "generated_at": now,
    }))
}
