// src/routes/insights.rs

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::engine::insights;
use crate::models::Insight;
use crate::AppState;

pub async fn list_insights(State(state): State<AppState>) -> Json<Vec<Insight>> {
    let store = state.store.read().await;
    Json(insights::evaluate(&store, Utc::now()))
}

pub async fn dismiss_insight(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let mut store = state.store.write().await;
    insights::dismiss_insight(&mut store, &id);
    Json(json!({"dismissed": id}))
}

pub async fn reset_insights(State(state): State<AppState>) -> Json<Value> {
    let mut store = state.store.write().await;
    insights::reset_dismissed(&mut store);
    Json(json!({"reset": true}))
}
