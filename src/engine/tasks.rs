// src/engine/tasks.rs
//
// Task board. Status only moves forward: pending → in_progress →
// completed, with cancellation from either non-terminal state.

use tracing::{debug, warn};

use crate::engine::EngineError;
use crate::models::{Department, Task, TaskPriority, TaskStatus};
use crate::store::Store;

pub fn add_task(
    store: &mut Store,
    title: String,
    department: Department,
    assigned_to: Option<i64>,
    priority: TaskPriority,
    room_number: Option<String>,
    estimated_minutes: Option<i32>,
) -> Task {
    let task = Task {
        task_id: store.next_id(),
        title,
        department,
        assigned_to,
        status: TaskStatus::Pending,
        priority,
        room_number,
        estimated_minutes,
    };
    debug!(task_id = task.task_id, ?department, "task added");
    store.tasks.push(task.clone());
    task
}

fn legal(from: TaskStatus, to: TaskStatus) -> bool {
    matches!(
        (from, to),
        (TaskStatus::Pending, TaskStatus::InProgress)
            | (TaskStatus::InProgress, TaskStatus::Completed)
            | (TaskStatus::Pending, TaskStatus::Cancelled)
            | (TaskStatus::InProgress, TaskStatus::Cancelled)
    )
}

/// Advances a task. Backward, same-state and out-of-terminal moves are
/// rejected with the task left unchanged.
pub fn update_task_status(store: &mut Store, id: i64, next: TaskStatus) -> Result<Task, EngineError> {
    let task = store
        .task_mut(id)
        .ok_or(EngineError::unknown("task", id))?;
    if !legal(task.status, next) {
        warn!(task_id = id, from = ?task.status, to = ?next, "task transition rejected");
        return Err(EngineError::transition(format!(
            "task {:?} -> {:?}",
            task.status, next
        )));
    }
    task.status = next;
    Ok(task.clone())
}

/// Tasks for display: optional department filter, ordered urgent-first.
pub fn list_tasks(store: &Store, department: Option<Department>) -> Vec<Task> {
    let mut tasks: Vec<Task> = store
        .tasks
        .iter()
        .filter(|t| department.map_or(true, |d| t.department == d))
        .cloned()
        .collect();
    tasks.sort_by_key(|t| t.priority.rank());
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(store: &mut Store, priority: TaskPriority) -> i64 {
        add_task(
            store,
            "test".into(),
            Department::Maintenance,
            None,
            priority,
            None,
            None,
        )
        .task_id
    }

    #[test]
    fn forward_chain_is_accepted() {
        let mut store = Store::new();
        let id = task(&mut store, TaskPriority::Medium);
        update_task_status(&mut store, id, TaskStatus::InProgress).unwrap();
        let done = update_task_status(&mut store, id, TaskStatus::Completed).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
    }

    #[test]
    fn backward_and_skip_moves_are_rejected() {
        let mut store = Store::new();
        let id = task(&mut store, TaskPriority::Medium);
        // pending -> completed skips in_progress
        assert!(update_task_status(&mut store, id, TaskStatus::Completed).is_err());
        update_task_status(&mut store, id, TaskStatus::InProgress).unwrap();
        assert!(update_task_status(&mut store, id, TaskStatus::Pending).is_err());
        assert_eq!(store.tasks[0].status, TaskStatus::InProgress, "unchanged on reject");
    }

    #[test]
    fn cancel_is_reachable_from_both_live_states_only() {
        let mut store = Store::new();
        let a = task(&mut store, TaskPriority::Low);
        let b = task(&mut store, TaskPriority::Low);
        update_task_status(&mut store, a, TaskStatus::Cancelled).unwrap();
        update_task_status(&mut store, b, TaskStatus::InProgress).unwrap();
        update_task_status(&mut store, b, TaskStatus::Cancelled).unwrap();
        assert!(update_task_status(&mut store, a, TaskStatus::InProgress).is_err());
    }

    #[test]
    fn unknown_task_is_a_soft_error() {
        let mut store = Store::new();
        let err = update_task_status(&mut store, 42, TaskStatus::InProgress).unwrap_err();
        assert!(err.is_soft());
    }

    #[test]
    fn listing_orders_urgent_first() {
        let mut store = Store::new();
        task(&mut store, TaskPriority::Low);
        task(&mut store, TaskPriority::Urgent);
        task(&mut store, TaskPriority::High);
        let out = list_tasks(&store, None);
        let prios: Vec<TaskPriority> = out.iter().map(|t| t.priority).collect();
        assert_eq!(
            prios,
            vec![TaskPriority::Urgent, TaskPriority::High, TaskPriority::Low]
        );
    }
}
