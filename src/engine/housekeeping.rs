// src/engine/housekeeping.rs
//
// Room-cleaning workflow. The status setter is deliberately
// unconditional: supervisors override rooms into any state
// (out_of_order, do_not_disturb, back to dirty after a failed
// inspection), so the room machine validates nothing. Attendant
// bookkeeping piggybacks on the transitions that matter.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::models::{AttendantStatus, CleaningStatus, HousekeepingRoom};
use crate::store::Store;

/// Sets a room's cleaning status, any state to any state. Unknown room
/// is a no-op. Side effects on the assigned attendant:
/// entering `in_progress` marks them cleaning; `in_progress` → `clean`
/// bumps their cleaned counter and frees them.
pub fn update_room_status(
    store: &mut Store,
    room_id: i64,
    status: CleaningStatus,
) -> Option<HousekeepingRoom> {
    let (previous, assigned_to) = {
        let room = store.room(room_id)?;
        (room.cleaning_status, room.assigned_to)
    };

    if let Some(room) = store.room_mut(room_id) {
        room.cleaning_status = status;
    }
    debug!(room_id, from = ?previous, to = ?status, "room status set");

    if let Some(attendant_id) = assigned_to {
        if let Some(att) = store.attendant_mut(attendant_id) {
            match (previous, status) {
                (_, CleaningStatus::InProgress) => att.status = AttendantStatus::Cleaning,
                (CleaningStatus::InProgress, CleaningStatus::Clean) => {
                    att.rooms_cleaned += 1;
                    att.status = AttendantStatus::Available;
                }
                _ => {}
            }
        }
    }

    store.room(room_id).cloned()
}

/// Assigns a room to an attendant. Last writer wins: re-assigning a
/// room already held by someone else is the supervisor's explicit
/// override, not an error.
pub fn assign_room_to_attendant(
    store: &mut Store,
    room_id: i64,
    attendant_id: i64,
) -> Option<HousekeepingRoom> {
    let previous = {
        let room = store.room_mut(room_id)?;
        room.assigned_to.replace(attendant_id)
    };
    if previous != Some(attendant_id) {
        if let Some(att) = store.attendant_mut(attendant_id) {
            att.rooms_assigned += 1;
        }
    }
    info!(room_id, attendant_id, ?previous, "room assigned");
    store.room(room_id).cloned()
}

/// Marks a room inspected and records score and inspector. No pass
/// threshold is enforced here; quality rules live in the insight
/// engine, and a failed room goes back through `update_room_status`.
pub fn mark_room_inspected(
    store: &mut Store,
    room_id: i64,
    score: i32,
    inspected_by: &str,
) -> Option<HousekeepingRoom> {
    let score = score.clamp(0, 100);
    let room = store.room_mut(room_id)?;
    room.cleaning_status = CleaningStatus::Inspected;
    room.inspection_score = Some(score);
    room.inspected_by = Some(inspected_by.to_string());
    info!(room_id, score, inspected_by, "room inspected");
    Some(room.clone())
}

/// Room counts per cleaning status, computed on read.
pub fn room_status_counts(store: &Store) -> HashMap<CleaningStatus, usize> {
    let mut counts = HashMap::new();
    for room in &store.rooms {
        *counts.entry(room.cleaning_status).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HousekeepingAttendant, OccupancyStatus, RoomPriority};

    fn store_with_room() -> (Store, i64) {
        let mut store = Store::new();
        let room_id = store.next_id();
        store.rooms.push(HousekeepingRoom {
            room_id,
            room_number: "201".into(),
            floor: 2,
            room_type: "standard".into(),
            cleaning_status: CleaningStatus::Dirty,
            occupancy_status: OccupancyStatus::Checkout,
            priority: RoomPriority::Normal,
            assigned_to: None,
            inspection_score: None,
            inspected_by: None,
            maintenance_issues: Vec::new(),
        });
        (store, room_id)
    }

    fn add_attendant(store: &mut Store, employee_id: i64) {
        store.attendants.push(HousekeepingAttendant {
            employee_id,
            zone: "A".into(),
            floor: 2,
            rooms_assigned: 0,
            rooms_cleaned: 0,
            avg_cleaning_time: 25.0,
            status: AttendantStatus::Available,
        });
    }

    #[test]
    fn any_status_may_be_set_from_any_other() {
        let (mut store, room_id) = store_with_room();
        update_room_status(&mut store, room_id, CleaningStatus::Inspected);
        let room = update_room_status(&mut store, room_id, CleaningStatus::Dirty).unwrap();
        assert_eq!(room.cleaning_status, CleaningStatus::Dirty, "failed inspection re-clean");
        let room = update_room_status(&mut store, room_id, CleaningStatus::OutOfOrder).unwrap();
        assert_eq!(room.cleaning_status, CleaningStatus::OutOfOrder);
    }

    #[test]
    fn assignment_is_last_writer_wins() {
        let (mut store, room_id) = store_with_room();
        add_attendant(&mut store, 100);
        add_attendant(&mut store, 101);
        assign_room_to_attendant(&mut store, room_id, 100);
        let room = assign_room_to_attendant(&mut store, room_id, 101).unwrap();
        assert_eq!(room.assigned_to, Some(101));
        assert_eq!(store.attendants[0].rooms_assigned, 1);
        assert_eq!(store.attendants[1].rooms_assigned, 1);
    }

    #[test]
    fn cleaning_cycle_updates_attendant_counters() {
        let (mut store, room_id) = store_with_room();
        add_attendant(&mut store, 100);
        assign_room_to_attendant(&mut store, room_id, 100);
        update_room_status(&mut store, room_id, CleaningStatus::InProgress);
        assert_eq!(store.attendants[0].status, AttendantStatus::Cleaning);
        update_room_status(&mut store, room_id, CleaningStatus::Clean);
        assert_eq!(store.attendants[0].rooms_cleaned, 1);
        assert_eq!(store.attendants[0].status, AttendantStatus::Available);
    }

    #[test]
    fn inspecting_a_clean_room_records_score_and_inspector() {
        let (mut store, room_id) = store_with_room();
        update_room_status(&mut store, room_id, CleaningStatus::Clean);
        let room = mark_room_inspected(&mut store, room_id, 92, "Supervisor").unwrap();
        assert_eq!(room.cleaning_status, CleaningStatus::Inspected);
        assert_eq!(room.inspection_score, Some(92));
        assert_eq!(room.inspected_by.as_deref(), Some("Supervisor"));
    }

    #[test]
    fn inspection_score_is_clamped_to_range() {
        let (mut store, room_id) = store_with_room();
        let room = mark_room_inspected(&mut store, room_id, 180, "Supervisor").unwrap();
        assert_eq!(room.inspection_score, Some(100));
    }

    #[test]
    fn unknown_room_is_a_noop() {
        let mut store = Store::new();
        assert!(update_room_status(&mut store, 5, CleaningStatus::Clean).is_none());
        assert!(assign_room_to_attendant(&mut store, 5, 1).is_none());
        assert!(mark_room_inspected(&mut store, 5, 90, "x").is_none());
    }

    #[test]
    fn status_counts_reflect_rooms() {
        let (mut store, room_id) = store_with_room();
        let other = store.next_id();
        let mut second = store.rooms[0].clone();
        second.room_id = other;
        second.cleaning_status = CleaningStatus::Clean;
        store.rooms.push(second);
        let _ = room_id;
        let counts = room_status_counts(&store);
        assert_eq!(counts.get(&CleaningStatus::Dirty), Some(&1));
        assert_eq!(counts.get(&CleaningStatus::Clean), Some(&1));
    }
}
