// src/routes/rooms.rs

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::housekeeping;
use crate::models::{CleaningStatus, HousekeepingAttendant, HousekeepingRoom};
use crate::AppState;

pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<HousekeepingRoom>> {
    let store = state.store.read().await;
    Json(store.rooms.clone())
}

pub async fn list_attendants(State(state): State<AppState>) -> Json<Vec<HousekeepingAttendant>> {
    let store = state.store.read().await;
    Json(store.attendants.clone())
}

#[derive(Deserialize)]
pub struct RoomStatusBody {
    pub status: CleaningStatus,
}

/// Unconditional set: the supervisor override is the contract here, so
/// there is no transition validation to fail.
pub async fn patch_room_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<RoomStatusBody>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match housekeeping::update_room_status(&mut store, id, b.status) {
        Some(room) => Json(json!(room)),
        None => Json(json!({"updated": false})),
    }
}

#[derive(Deserialize)]
pub struct AssignRoomBody {
    pub attendant_id: i64,
}

pub async fn assign_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<AssignRoomBody>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match housekeeping::assign_room_to_attendant(&mut store, id, b.attendant_id) {
        Some(room) => Json(json!(room)),
        None => Json(json!({"updated": false})),
    }
}

#[derive(Deserialize)]
pub struct InspectRoomBody {
    pub score: i32,
    pub inspected_by: String,
}

pub async fn inspect_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<InspectRoomBody>,
) -> Json<Value> {
    let mut store = state.store.write().await;
    match housekeeping::mark_room_inspected(&mut store, id, b.score, &b.inspected_by) {
        Some(room) => Json(json!(room)),
        None => Json(json!({"updated": false})),
    }
}

pub async fn room_status_counts(
    State(state): State<AppState>,
) -> Json<HashMap<CleaningStatus, usize>> {
    let store = state.store.read().await;
    Json(housekeeping::room_status_counts(&store))
}
