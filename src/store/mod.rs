// src/store/mod.rs
//
// In-memory registry. The single writer: every mutation goes through an
// engine operation holding the write lock on this struct; readers clone
// what they need under the read lock so derived values come from one
// consistent snapshot.

use std::collections::HashSet;

use crate::models::*;

pub mod seed;

#[derive(Debug, Default)]
pub struct Store {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub tasks: Vec<Task>,
    pub rooms: Vec<HousekeepingRoom>,
    pub attendants: Vec<HousekeepingAttendant>,
    pub vehicles: Vec<Vehicle>,
    pub trips: Vec<DriverTrip>,
    pub transport_requests: Vec<TransportationRequest>,
    pub time_off: Vec<TimeOffRequest>,

    /// Insight ids dismissed this session; cleared by `reset`.
    pub dismissed_insights: HashSet<String>,

    next_id: i64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Allocates the next sequential id, shared across all collections.
    pub fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ── lookups ──────────────────────────

    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == id)
    }

    pub fn employee_mut(&mut self, id: i64) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.employee_id == id)
    }

    pub fn shift_mut(&mut self, id: i64) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| s.shift_id == id)
    }

    pub fn task_mut(&mut self, id: i64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.task_id == id)
    }

    pub fn room(&self, id: i64) -> Option<&HousekeepingRoom> {
        self.rooms.iter().find(|r| r.room_id == id)
    }

    pub fn room_mut(&mut self, id: i64) -> Option<&mut HousekeepingRoom> {
        self.rooms.iter_mut().find(|r| r.room_id == id)
    }

    pub fn attendant_mut(&mut self, employee_id: i64) -> Option<&mut HousekeepingAttendant> {
        self.attendants
            .iter_mut()
            .find(|a| a.employee_id == employee_id)
    }

    pub fn vehicle(&self, id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vehicle_id == id)
    }

    pub fn vehicle_mut(&mut self, id: i64) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.vehicle_id == id)
    }

    pub fn trip(&self, id: i64) -> Option<&DriverTrip> {
        self.trips.iter().find(|t| t.trip_id == id)
    }

    pub fn trip_mut(&mut self, id: i64) -> Option<&mut DriverTrip> {
        self.trips.iter_mut().find(|t| t.trip_id == id)
    }

    pub fn transport_request_mut(&mut self, id: i64) -> Option<&mut TransportationRequest> {
        self.transport_requests
            .iter_mut()
            .find(|r| r.request_id == id)
    }

    pub fn time_off_mut(&mut self, id: i64) -> Option<&mut TimeOffRequest> {
        self.time_off.iter_mut().find(|t| t.time_off_id == id)
    }
}
