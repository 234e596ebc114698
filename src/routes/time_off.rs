// src/routes/time_off.rs

use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::scheduler;
use crate::models::TimeOffRequest;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateTimeOffBody {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

pub async fn create_time_off(
    State(state): State<AppState>,
    Json(b): Json<CreateTimeOffBody>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match scheduler::add_time_off(&mut store, b.employee_id, b.start_date, b.end_date, b.reason) {
        Some(request) => Json(json!(request)),
        None => Json(json!({"created": false})),
    }
}

pub async fn list_time_off(State(state): State<AppState>) -> Json<Vec<TimeOffRequest>> {
    let store = state.store.read().await;
    Json(store.time_off.clone())
}

pub async fn approve_time_off(State(state): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    resolve(state, id, true).await
}

pub async fn deny_time_off(State(state): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    resolve(state, id, false).await
}

async fn resolve(state: AppState, id: i64, approve: bool) -> Json<Value> {
    let mut store = state.store.write().await;
    let today = Utc::now().date_naive();
    match scheduler::resolve_time_off(&mut store, id, approve, today) {
        Some(request) => Json(json!(request)),
        None => Json(json!({"updated": false})),
    }
}
