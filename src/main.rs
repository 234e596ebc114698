// src/main.rs

use std::env;
use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::store::Store;

mod engine;
mod models;
mod routes;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Demo seed unless explicitly disabled
    let seed = env::var("SEED_DEMO_DATA").map_or(true, |v| v != "false" && v != "0");
    let store = if seed {
        store::seed::demo_store()
    } else {
        Store::new()
    };
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
    };

    // Very permissive CORS for local dev (tighten for prod)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Root API router
    let api = Router::new()
        // health
        .route("/health", get(routes::health::health))
        // employees
        .route("/api/v1/employees", get(routes::employees::list_employees))
        .route(
            "/api/v1/employees/:id",
            get(routes::employees::get_employee).patch(routes::employees::patch_employee),
        )
        .route(
            "/api/v1/employees/:id/shift-conflicts",
            get(routes::shifts::shift_conflicts),
        )
        // shifts
        .route(
            "/api/v1/shifts",
            post(routes::shifts::create_shift).get(routes::shifts::list_shifts),
        )
        .route(
            "/api/v1/shifts/:id",
            patch(routes::shifts::patch_shift).delete(routes::shifts::delete_shift),
        )
        // tasks
        .route(
            "/api/v1/tasks",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        )
        .route("/api/v1/tasks/:id/status", patch(routes::tasks::patch_task_status))
        // housekeeping
        .route("/api/v1/rooms", get(routes::rooms::list_rooms))
        .route("/api/v1/rooms/status-counts", get(routes::rooms::room_status_counts))
        .route("/api/v1/rooms/:id/status", patch(routes::rooms::patch_room_status))
        .route("/api/v1/rooms/:id/assign", post(routes::rooms::assign_room))
        .route("/api/v1/rooms/:id/inspect", post(routes::rooms::inspect_room))
        .route("/api/v1/attendants", get(routes::rooms::list_attendants))
        // fleet
        .route("/api/v1/vehicles", get(routes::vehicles::list_vehicles))
        .route(
            "/api/v1/vehicles/:id/status",
            patch(routes::vehicles::patch_vehicle_status),
        )
        // dispatch
        .route(
            "/api/v1/trips",
            post(routes::trips::create_trip).get(routes::trips::list_trips),
        )
        .route("/api/v1/trips/:id/assign", post(routes::trips::assign_trip))
        .route("/api/v1/trips/:id/status", patch(routes::trips::patch_trip_status))
        .route("/api/v1/trips/:id/cancel", post(routes::trips::cancel_trip))
        .route(
            "/api/v1/transport-requests",
            get(routes::trips::list_transport_requests),
        )
        .route(
            "/api/v1/transport-requests/:id/convert",
            post(routes::trips::convert_request),
        )
        .route(
            "/api/v1/transport-requests/:id/reject",
            post(routes::trips::reject_request),
        )
        // time off
        .route(
            "/api/v1/time-off",
            post(routes::time_off::create_time_off).get(routes::time_off::list_time_off),
        )
        .route(
            "/api/v1/time-off/:id/approve",
            post(routes::time_off::approve_time_off),
        )
        .route("/api/v1/time-off/:id/deny", post(routes::time_off::deny_time_off))
        // derived views
        .route("/api/v1/metrics/departments", get(routes::metrics::department_metrics))
        .route(
            "/api/v1/metrics/housekeeping",
            get(routes::metrics::housekeeping_metrics),
        )
        .route("/api/v1/metrics/drivers", get(routes::metrics::driver_metrics))
        .route("/api/v1/insights", get(routes::insights::list_insights))
        .route(
            "/api/v1/insights/:id/dismiss",
            post(routes::insights::dismiss_insight),
        )
        .route("/api/v1/insights/reset", post(routes::insights::reset_insights))
        .route("/api/v1/assistant/context", get(routes::assistant::context_data))
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Port (axum 0.7 style)
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080); // default 8080

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;

    info!(%addr, seed, "API listening");
    axum::serve(listener, api.into_make_service()).await?;
    Ok(())
}
