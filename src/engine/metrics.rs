// src/engine/metrics.rs
//
// Pure aggregation over a store snapshot. Every function takes the
// store (and an explicit `now` where wall time matters) and derives a
// metrics struct from entity state alone: no interior caches, no
// randomness, same snapshot in, same numbers out.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    AttendantStatus, CleaningStatus, Department, DepartmentMetrics, DriverMetrics,
    EmployeeStatus, HousekeepingMetrics, TaskStatus, TripStatus, VehicleStatus,
};
use crate::store::Store;

/// Grace window on pickups before a trip counts as late.
const ON_TIME_GRACE_MINUTES: i64 = 10;

/// Per-department headcounts, task counts and performance, one entry
/// per department in display order.
pub fn department_metrics(store: &Store) -> Vec<DepartmentMetrics> {
    Department::ALL
        .iter()
        .map(|&department| {
            let staff: Vec<_> = store
                .employees
                .iter()
                .filter(|e| e.department == department)
                .collect();
            let count = |status: EmployeeStatus| {
                staff.iter().filter(|e| e.status == status).count()
            };
            let avg_performance = if staff.is_empty() {
                0.0
            } else {
                staff.iter().map(|e| e.performance_score as f64).sum::<f64>() / staff.len() as f64
            };
            let tasks = |status: TaskStatus| {
                store
                    .tasks
                    .iter()
                    .filter(|t| t.department == department && t.status == status)
                    .count()
            };
            DepartmentMetrics {
                department,
                on_duty: count(EmployeeStatus::OnDuty),
                off_duty: count(EmployeeStatus::OffDuty),
                on_break: count(EmployeeStatus::OnBreak),
                on_leave: count(EmployeeStatus::OnLeave),
                tasks_pending: tasks(TaskStatus::Pending),
                tasks_completed: tasks(TaskStatus::Completed),
                avg_performance,
                overtime_hours: staff.iter().map(|e| e.overtime_hours).sum(),
            }
        })
        .collect()
}

pub fn housekeeping_metrics(store: &Store) -> HousekeepingMetrics {
    let count = |status: CleaningStatus| {
        store
            .rooms
            .iter()
            .filter(|r| r.cleaning_status == status)
            .count()
    };
    let clean = count(CleaningStatus::Clean);
    let inspected = count(CleaningStatus::Inspected);
    let total_rooms = store.rooms.len();
    let rooms_cleaned_today = clean + inspected;

    let scores: Vec<f64> = store
        .rooms
        .iter()
        .filter_map(|r| r.inspection_score)
        .map(f64::from)
        .collect();
    let quality_score = if scores.is_empty() {
        100.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let avg_cleaning_time = if store.attendants.is_empty() {
        0.0
    } else {
        store.attendants.iter().map(|a| a.avg_cleaning_time).sum::<f64>()
            / store.attendants.len() as f64
    };

    HousekeepingMetrics {
        total_rooms,
        dirty: count(CleaningStatus::Dirty),
        in_progress: count(CleaningStatus::InProgress),
        clean,
        inspected,
        out_of_order: count(CleaningStatus::OutOfOrder),
        do_not_disturb: count(CleaningStatus::DoNotDisturb),
        rooms_cleaned_today,
        completion_rate: ratio(rooms_cleaned_today, total_rooms),
        quality_score,
        avg_cleaning_time,
        attendants_available: store
            .attendants
            .iter()
            .filter(|a| a.status == AttendantStatus::Available)
            .count(),
        attendants_total: store.attendants.len(),
    }
}

pub fn driver_metrics(store: &Store, now: DateTime<Utc>) -> DriverMetrics {
    let drivers: Vec<_> = store
        .employees
        .iter()
        .filter(|e| e.department == Department::Drivers)
        .collect();
    let available_drivers = drivers
        .iter()
        .filter(|e| e.status == EmployeeStatus::OnDuty)
        .count();

    let vehicle_count = |status: VehicleStatus| {
        store.vehicles.iter().filter(|v| v.status == status).count()
    };

    let pending_trips = store
        .trips
        .iter()
        .filter(|t| t.status == TripStatus::Pending)
        .count();
    let active_trips = store
        .trips
        .iter()
        .filter(|t| !t.status.is_terminal() && t.status != TripStatus::Pending)
        .count();

    let today = now.date_naive();
    let completed_today = store
        .trips
        .iter()
        .filter(|t| {
            t.status == TripStatus::Completed
                && t.completed_at.map_or(false, |at| at.date_naive() == today)
        })
        .count();

    // On-time: picked up within the grace window of the scheduled time.
    // Completed trips with no pickup stamp get the benefit of the doubt.
    let finished: Vec<_> = store
        .trips
        .iter()
        .filter(|t| t.status == TripStatus::Completed)
        .collect();
    let on_time = finished
        .iter()
        .filter(|t| match t.picked_up_at {
            Some(at) => at <= t.scheduled_time + Duration::minutes(ON_TIME_GRACE_MINUTES),
            None => true,
        })
        .count();
    let on_time_rate = if finished.is_empty() {
        1.0
    } else {
        ratio(on_time, finished.len())
    };

    let waits: Vec<f64> = store
        .trips
        .iter()
        .filter_map(|t| t.picked_up_at.map(|at| (at - t.scheduled_time).num_minutes()))
        .map(|m| m.max(0) as f64)
        .collect();
    let avg_wait_minutes = if waits.is_empty() {
        0.0
    } else {
        waits.iter().sum::<f64>() / waits.len() as f64
    };

    // Satisfaction degrades with average wait, two points per minute,
    // floored at 60.
    let satisfaction_score = (100.0 - avg_wait_minutes * 2.0).clamp(60.0, 100.0);

    let revenue_today = store
        .trips
        .iter()
        .filter(|t| {
            t.status == TripStatus::Completed
                && t.completed_at.map_or(false, |at| at.date_naive() == today)
        })
        .map(|t| t.trip_type.fare())
        .sum();

    DriverMetrics {
        total_drivers: drivers.len(),
        available_drivers,
        total_vehicles: store.vehicles.len(),
        available_vehicles: vehicle_count(VehicleStatus::Available),
        vehicles_in_use: vehicle_count(VehicleStatus::InUse),
        pending_trips,
        active_trips,
        completed_today,
        on_time_rate,
        avg_wait_minutes,
        satisfaction_score,
        revenue_today,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
