// src/routes/tasks.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::tasks;
use crate::models::{Department, Task, TaskPriority, TaskStatus};
use crate::routes::engine_error;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    pub department: Department,
    pub assigned_to: Option<i64>,
    #[serde(default = "default_priority")]
    pub priority: TaskPriority,
    pub room_number: Option<String>,
    pub estimated_minutes: Option<i32>,
}

fn default_priority() -> TaskPriority {
    TaskPriority::Medium
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(b): Json<CreateTaskBody>,
) -> Json<Task> {
    let mut store = state.store.write().await;
    Json(tasks::add_task(
        &mut store,
        b.title,
        b.department,
        b.assigned_to,
        b.priority,
        b.room_number,
        b.estimated_minutes,
    ))
}

#[derive(Deserialize)]
pub struct ListTasksQuery {
    pub department: Option<Department>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(q): Query<ListTasksQuery>,
) -> Json<Vec<Task>> {
    let store = state.store.read().await;
    Json(tasks::list_tasks(&store, q.department))
}

#[derive(Deserialize)]
pub struct TaskStatusBody {
    pub status: TaskStatus,
}

pub async fn patch_task_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(b): Json<TaskStatusBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    match tasks::update_task_status(&mut store, id, b.status) {
        Ok(task) => Ok(Json(json!(task))),
        Err(e) => engine_error(e),
    }
}
