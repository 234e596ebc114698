// src/engine/scheduler.rs
//
// Shift scheduling. Creation is deliberately permissive: incomplete
// input is silently ignored and overlapping shifts for the same
// employee/day are allowed (split coverage is legitimately recorded as
// two rows). `shift_conflicts` exposes the overlaps so calling UIs can
// warn instead.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::{
    Department, Employee, EmployeeStatus, GpsLocation, Shift, ShiftStatus, ShiftType,
    TimeOffRequest, TimeOffStatus,
};
use crate::store::Store;

/// Partial update for an existing shift.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct ShiftPatch {
    pub date: Option<NaiveDate>,
    pub shift_type: Option<ShiftType>,
    pub department: Option<Department>,
    pub status: Option<ShiftStatus>,
    pub notes: Option<String>,
}

/// Creates a shift. Any missing required field means no record is
/// created and `None` comes back.
pub fn add_shift(
    store: &mut Store,
    employee_id: Option<i64>,
    date: Option<NaiveDate>,
    shift_type: Option<ShiftType>,
    department: Department,
    notes: Option<String>,
) -> Option<Shift> {
    let (employee_id, date, shift_type) = match (employee_id, date, shift_type) {
        (Some(e), Some(d), Some(t)) => (e, d, t),
        _ => {
            debug!("add_shift ignored: incomplete input");
            return None;
        }
    };
    let (start_time, end_time) = shift_type.window();
    let shift = Shift {
        shift_id: store.next_id(),
        employee_id,
        date,
        shift_type,
        start_time,
        end_time,
        department,
        status: ShiftStatus::Scheduled,
        notes,
    };
    debug!(shift_id = shift.shift_id, employee_id, %date, "shift added");
    store.shifts.push(shift.clone());
    Some(shift)
}

/// Applies a partial update; changing the shift type re-derives the
/// start/end window. Unknown id is a no-op.
pub fn update_shift(store: &mut Store, id: i64, patch: ShiftPatch) -> Option<Shift> {
    let shift = store.shift_mut(id)?;
    if let Some(date) = patch.date {
        shift.date = date;
    }
    if let Some(shift_type) = patch.shift_type {
        shift.shift_type = shift_type;
        let (start, end) = shift_type.window();
        shift.start_time = start;
        shift.end_time = end;
    }
    if let Some(department) = patch.department {
        shift.department = department;
    }
    if let Some(status) = patch.status {
        shift.status = status;
    }
    if let Some(notes) = patch.notes {
        shift.notes = Some(notes);
    }
    Some(shift.clone())
}

pub fn delete_shift(store: &mut Store, id: i64) -> bool {
    let before = store.shifts.len();
    store.shifts.retain(|s| s.shift_id != id);
    store.shifts.len() != before
}

pub fn shifts_for_employee(store: &Store, employee_id: i64) -> Vec<Shift> {
    store
        .shifts
        .iter()
        .filter(|s| s.employee_id == employee_id)
        .cloned()
        .collect()
}

pub fn shifts_for_department(store: &Store, department: Department) -> Vec<Shift> {
    store
        .shifts
        .iter()
        .filter(|s| s.department == department)
        .cloned()
        .collect()
}

/// Shifts within an inclusive date range, for week views.
pub fn shifts_in_range(store: &Store, from: NaiveDate, to: NaiveDate) -> Vec<Shift> {
    store
        .shifts
        .iter()
        .filter(|s| s.date >= from && s.date <= to)
        .cloned()
        .collect()
}

/// Same-day shifts for one employee whose time windows overlap another
/// shift of theirs. Night shifts count as ending at midnight for this
/// check; the spill into the next morning is not flagged.
pub fn shift_conflicts(store: &Store, employee_id: i64, date: NaiveDate) -> Vec<Shift> {
    let day: Vec<&Shift> = store
        .shifts
        .iter()
        .filter(|s| s.employee_id == employee_id && s.date == date)
        .collect();
    let mut conflicts: Vec<Shift> = Vec::new();
    for (i, a) in day.iter().enumerate() {
        let overlaps = day.iter().enumerate().any(|(j, b)| {
            i != j && a.start_time < effective_end(b) && b.start_time < effective_end(a)
        });
        if overlaps {
            conflicts.push((*a).clone());
        }
    }
    conflicts
}

/// Clock events and corrections: status changes, hour totals, GPS
/// snapshots. Employees are never deleted, only patched.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct EmployeePatch {
    pub status: Option<EmployeeStatus>,
    pub hours_this_week: Option<f64>,
    pub overtime_hours: Option<f64>,
    pub performance_score: Option<i32>,
    pub gps_location: Option<GpsLocation>,
}

pub fn update_employee(store: &mut Store, id: i64, patch: EmployeePatch) -> Option<Employee> {
    let employee = store.employee_mut(id)?;
    if let Some(status) = patch.status {
        employee.status = status;
    }
    if let Some(hours) = patch.hours_this_week {
        employee.hours_this_week = hours;
    }
    if let Some(overtime) = patch.overtime_hours {
        employee.overtime_hours = overtime;
    }
    if let Some(score) = patch.performance_score {
        employee.performance_score = score.clamp(0, 100);
    }
    if let Some(gps) = patch.gps_location {
        employee.gps_location = Some(gps);
    }
    Some(employee.clone())
}

pub fn add_time_off(
    store: &mut Store,
    employee_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<String>,
) -> Option<TimeOffRequest> {
    store.employee(employee_id)?;
    let request = TimeOffRequest {
        time_off_id: store.next_id(),
        employee_id,
        start_date,
        end_date,
        reason,
        status: TimeOffStatus::Pending,
    };
    store.time_off.push(request.clone());
    Some(request)
}

/// Approves or denies a pending request. Approval covering `today`
/// immediately moves the employee to on_leave.
pub fn resolve_time_off(
    store: &mut Store,
    id: i64,
    approve: bool,
    today: NaiveDate,
) -> Option<TimeOffRequest> {
    let (employee_id, range) = {
        let request = store.time_off_mut(id)?;
        if request.status != TimeOffStatus::Pending {
            return None;
        }
        request.status = if approve {
            TimeOffStatus::Approved
        } else {
            TimeOffStatus::Denied
        };
        (request.employee_id, (request.start_date, request.end_date))
    };
    if approve && range.0 <= today && today <= range.1 {
        if let Some(employee) = store.employee_mut(employee_id) {
            employee.status = EmployeeStatus::OnLeave;
        }
    }
    info!(time_off_id = id, approve, "time-off resolved");
    store.time_off.iter().find(|t| t.time_off_id == id).cloned()
}

fn effective_end(shift: &Shift) -> chrono::NaiveTime {
    if shift.end_time <= shift.start_time {
        // wraps midnight
        chrono::NaiveTime::from_hms_opt(23, 59, 59).expect("valid time")
    } else {
        shift.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn add_shift_derives_window_from_type() {
        let mut store = Store::new();
        let shift = add_shift(
            &mut store,
            Some(1),
            Some(date()),
            Some(ShiftType::Afternoon),
            Department::FrontDesk,
            None,
        )
        .unwrap();
        assert_eq!(shift.status, ShiftStatus::Scheduled);
        assert_eq!(shift.start_time.to_string(), "14:00:00");
        assert_eq!(shift.end_time.to_string(), "22:00:00");
    }

    #[test]
    fn add_shift_with_missing_field_is_silently_ignored() {
        let mut store = Store::new();
        let out = add_shift(
            &mut store,
            None,
            Some(date()),
            Some(ShiftType::Morning),
            Department::Spa,
            None,
        );
        assert!(out.is_none());
        assert!(store.shifts.is_empty());
    }

    #[test]
    fn overlapping_shifts_are_allowed_but_reported() {
        let mut store = Store::new();
        add_shift(&mut store, Some(7), Some(date()), Some(ShiftType::Morning), Department::Security, None);
        add_shift(&mut store, Some(7), Some(date()), Some(ShiftType::Split), Department::Security, None);
        add_shift(&mut store, Some(7), Some(date()), Some(ShiftType::Night), Department::Security, None);
        assert_eq!(store.shifts.len(), 3, "scheduler never blocks overlaps");
        // morning and split overlap; night starts exactly where split ends.
        let conflicts = shift_conflicts(&store, 7, date());
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn morning_then_afternoon_do_not_conflict() {
        let mut store = Store::new();
        add_shift(&mut store, Some(7), Some(date()), Some(ShiftType::Morning), Department::Security, None);
        add_shift(&mut store, Some(7), Some(date()), Some(ShiftType::Afternoon), Department::Security, None);
        assert!(shift_conflicts(&store, 7, date()).is_empty());
    }

    #[test]
    fn patch_shift_type_rederives_times() {
        let mut store = Store::new();
        let shift = add_shift(&mut store, Some(1), Some(date()), Some(ShiftType::Morning), Department::Spa, None).unwrap();
        let updated = update_shift(
            &mut store,
            shift.shift_id,
            ShiftPatch {
                shift_type: Some(ShiftType::Night),
                ..ShiftPatch::default()
            },
        )
        .unwrap();
        assert_eq!(updated.start_time.to_string(), "22:00:00");
        assert_eq!(updated.end_time.to_string(), "06:00:00");
    }

    #[test]
    fn delete_unknown_shift_is_noop() {
        let mut store = Store::new();
        assert!(!delete_shift(&mut store, 999));
    }

    fn seed_employee(store: &mut Store) -> i64 {
        let id = store.next_id();
        store.employees.push(Employee {
            employee_id: id,
            name: "Test".into(),
            department: Department::FrontDesk,
            role: "Receptionist".into(),
            status: EmployeeStatus::OnDuty,
            performance_score: 85,
            hours_this_week: 20.0,
            overtime_hours: 0.0,
            skills: Vec::new(),
            certifications: Vec::new(),
            gps_location: None,
            current_vehicle_id: None,
        });
        id
    }

    #[test]
    fn employee_patch_applies_clock_events() {
        let mut store = Store::new();
        let id = seed_employee(&mut store);
        let updated = update_employee(
            &mut store,
            id,
            EmployeePatch {
                status: Some(EmployeeStatus::OnBreak),
                overtime_hours: Some(3.5),
                performance_score: Some(150),
                ..EmployeePatch::default()
            },
        )
        .unwrap();
        assert_eq!(updated.status, EmployeeStatus::OnBreak);
        assert_eq!(updated.overtime_hours, 3.5);
        assert_eq!(updated.performance_score, 100, "clamped");
    }

    #[test]
    fn approving_current_time_off_moves_employee_on_leave() {
        let mut store = Store::new();
        let id = seed_employee(&mut store);
        let request = add_time_off(&mut store, id, date(), date(), None).unwrap();
        let resolved = resolve_time_off(&mut store, request.time_off_id, true, date()).unwrap();
        assert_eq!(resolved.status, TimeOffStatus::Approved);
        assert_eq!(store.employee(id).unwrap().status, EmployeeStatus::OnLeave);
        // already resolved: further resolution is a no-op
        assert!(resolve_time_off(&mut store, request.time_off_id, false, date()).is_none());
    }

    #[test]
    fn future_time_off_does_not_change_status_yet() {
        let mut store = Store::new();
        let id = seed_employee(&mut store);
        let later = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        let request = add_time_off(&mut store, id, later, later, None).unwrap();
        resolve_time_off(&mut store, request.time_off_id, true, date()).unwrap();
        assert_eq!(store.employee(id).unwrap().status, EmployeeStatus::OnDuty);
    }

    #[test]
    fn time_off_for_unknown_employee_is_ignored() {
        let mut store = Store::new();
        assert!(add_time_off(&mut store, 99, date(), date(), None).is_none());
    }

    #[test]
    fn range_query_is_inclusive() {
        let mut store = Store::new();
        for day in 1..=5 {
            add_shift(
                &mut store,
                Some(1),
                NaiveDate::from_ymd_opt(2026, 9, day),
                Some(ShiftType::Morning),
                Department::FrontDesk,
                None,
            );
        }
        let hits = shifts_in_range(
            &store,
            NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
        );
        assert_eq!(hits.len(), 3);
    }
}
