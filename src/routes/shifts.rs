// src/routes/shifts.rs

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::scheduler::{self, ShiftPatch};
use crate::models::{Department, Shift, ShiftType};
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateShiftBody {
    pub employee_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub shift_type: Option<ShiftType>,
    pub department: Department,
    pub notes: Option<String>,
}

/// Missing required fields are silently ignored: `created: false`
/// comes back and nothing is stored.
pub async fn create_shift(
    State(state): State<AppState>,
    Json(b): Json<CreateShiftBody>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match scheduler::add_shift(
        &mut store,
        b.employee_id,
        b.date,
        b.shift_type,
        b.department,
        b.notes,
    ) {
        Some(shift) => Json(json!(shift)),
        None => Json(json!({"created": false})),
    }
}

#[derive(Deserialize)]
pub struct ListShiftsQuery {
    pub employee_id: Option<i64>,
    pub department: Option<Department>,
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn list_shifts(
    State(state): State<AppState>,
    Query(q): Query<ListShiftsQuery>,
) -> Json<Vec<Shift>> {
    let store = state.store.read().await;
    let mut shifts: Vec<Shift> = if let (Some(from), Some(to)) = (q.from, q.to) {
        scheduler::shifts_in_range(&store, from, to)
    } else if let Some(employee_id) = q.employee_id {
        scheduler::shifts_for_employee(&store, employee_id)
    } else if let Some(department) = q.department {
        scheduler::shifts_for_department(&store, department)
    } else {
        store.shifts.clone()
    };
    if let Some(employee_id) = q.employee_id {
        shifts.retain(|s| s.employee_id == employee_id);
    }
    if let Some(department) = q.department {
        shifts.retain(|s| s.department == department);
    }
    if let Some(date) = q.date {
        shifts.retain(|s| s.date == date);
    }
    Json(shifts)
}

pub async fn patch_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ShiftPatch>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match scheduler::update_shift(&mut store, id, patch) {
        Some(shift) => Json(json!(shift)),
        None => Json(json!({"updated": false})),
    }
}

pub async fn delete_shift(State(state): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    let mut store = state.store.write().await;
    let deleted = scheduler::delete_shift(&mut store, id);
    Json(json!({"deleted": deleted}))
}

#[derive(Deserialize)]
pub struct ConflictQuery {
    pub date: NaiveDate,
}

/// Overlap report for one employee/day; the scheduler itself never
/// blocks overlapping rows.
pub async fn shift_conflicts(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    Query(q): Query<ConflictQuery>,
) -> Json<Vec<Shift>> {
    let store = state.store.read().await;
    Json(scheduler::shift_conflicts(&store, employee_id, q.date))
}
