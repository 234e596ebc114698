// src/routes/employees.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::scheduler::{self, EmployeePatch};
use crate::models::{Department, Employee};
use crate::AppState;

#[derive(Deserialize)]
pub struct ListEmployeesQuery {
    pub department: Option<Department>,
}

pub async fn list_employees(
    State(state): State<AppState>,
    Query(q): Query<ListEmployeesQuery>,
) -> Json<Vec<Employee>> {
    let store = state.store.read().await;
    let out = store
        .employees
        .iter()
        .filter(|e| q.department.map_or(true, |d| e.department == d))
        .cloned()
        .collect();
    Json(out)
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, (StatusCode, String)> {
    let store = state.store.read().await;
    store
        .employee(id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("no employee {id}")))
}

pub async fn patch_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<EmployeePatch>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match scheduler::update_employee(&mut store, id, patch) {
        Some(employee) => Json(json!(employee)),
        None => Json(json!({"updated": false})),
    }
}
