// src/routes/mod.rs

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::engine::EngineError;

pub mod assistant;
pub mod employees;
pub mod health;
pub mod insights;
pub mod metrics;
pub mod rooms;
pub mod shifts;
pub mod tasks;
pub mod time_off;
pub mod trips;
pub mod vehicles;

/// Maps an engine rejection to the HTTP surface: unknown ids are soft
/// no-ops (the UI may be clicking on stale data), real transition and
/// validation failures are 409s the caller is expected to handle.
pub fn engine_error(e: EngineError) -> Result<Json<Value>, (StatusCode, String)> {
    if e.is_soft() {
        Ok(Json(json!({"updated": false})))
    } else {
        Err((StatusCode::CONFLICT, e.to_string()))
    }
}
