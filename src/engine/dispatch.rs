// src/engine/dispatch.rs
//
// Fleet and trip dispatch. The trip machine is strictly forward:
// pending → assigned → en_route_pickup → guest_picked_up → in_progress
// → completed, one step at a time, with cancellation from any
// non-terminal state. Assignment is the only place a driver/vehicle
// pair gets bound, and it validates both sides so the rest of the
// lifecycle can trust the binding.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::engine::EngineError;
use crate::models::{
    Department, DriverTrip, EmployeeStatus, FlightStatus, RequestStatus, TripPriority, TripStatus,
    TripType, Vehicle, VehicleStatus,
};
use crate::store::Store;

/// Explicit vehicle status set. Permissive like the room machine:
/// maintenance and out_of_service are operator overrides.
pub fn update_vehicle_status(
    store: &mut Store,
    vehicle_id: i64,
    status: VehicleStatus,
) -> Option<Vehicle> {
    let vehicle = store.vehicle_mut(vehicle_id)?;
    debug!(vehicle_id, from = ?vehicle.status, to = ?status, "vehicle status set");
    vehicle.status = status;
    Some(vehicle.clone())
}

/// Inbound trip fields. Everything beyond guest/pickup/dropoff/time is
/// optional with defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewTrip {
    pub trip_type: Option<TripType>,
    pub priority: Option<TripPriority>,
    pub guest_name: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub number_of_guests: Option<i32>,
    pub flight_number: Option<String>,
    pub flight_status: Option<FlightStatus>,
}

/// Creates a pending trip. Missing required fields mean nothing is
/// created (same silent-ignore contract as the shift scheduler).
pub fn add_driver_trip(store: &mut Store, new: NewTrip) -> Option<DriverTrip> {
    let (guest_name, pickup_location, dropoff_location, scheduled_time) = match (
        new.guest_name,
        new.pickup_location,
        new.dropoff_location,
        new.scheduled_time,
    ) {
        (Some(g), Some(p), Some(d), Some(t)) => (g, p, d, t),
        _ => {
            debug!("add_driver_trip ignored: incomplete input");
            return None;
        }
    };
    let trip = DriverTrip {
        trip_id: store.next_id(),
        trip_type: new.trip_type.unwrap_or(TripType::Shuttle),
        status: TripStatus::Pending,
        priority: new.priority.unwrap_or(TripPriority::Normal),
        guest_name,
        pickup_location,
        dropoff_location,
        scheduled_time,
        number_of_guests: new.number_of_guests.unwrap_or(1),
        driver_id: None,
        vehicle_id: None,
        flight_number: new.flight_number,
        flight_status: new.flight_status,
        picked_up_at: None,
        completed_at: None,
    };
    info!(trip_id = trip.trip_id, trip_type = ?trip.trip_type, "trip created");
    store.trips.push(trip.clone());
    Some(trip)
}

/// Binds a driver and a vehicle to a pending trip. Every precondition
/// is checked before anything mutates, so a rejection leaves the trip
/// pending and the fleet untouched.
pub fn assign_driver_to_trip(
    store: &mut Store,
    trip_id: i64,
    driver_id: i64,
    vehicle_id: i64,
) -> Result<DriverTrip, EngineError> {
    let trip_status = store
        .trip(trip_id)
        .map(|t| t.status)
        .ok_or(EngineError::unknown("trip", trip_id))?;
    if trip_status != TripStatus::Pending {
        return Err(EngineError::rejected(format!(
            "trip is {trip_status:?}, only pending trips can be assigned"
        )));
    }

    let driver = store
        .employee(driver_id)
        .ok_or(EngineError::unknown("driver", driver_id))?;
    if driver.department != Department::Drivers {
        return Err(EngineError::rejected(format!(
            "employee {} is not in the drivers department",
            driver.name
        )));
    }
    if driver.status != EmployeeStatus::OnDuty {
        warn!(trip_id, driver_id, status = ?driver.status, "assignment rejected: driver off duty");
        return Err(EngineError::rejected(format!(
            "driver {} is {:?}, not on duty",
            driver.name, driver.status
        )));
    }

    let vehicle = store
        .vehicle(vehicle_id)
        .ok_or(EngineError::unknown("vehicle", vehicle_id))?;
    if vehicle.status != VehicleStatus::Available {
        warn!(trip_id, vehicle_id, status = ?vehicle.status, "assignment rejected: vehicle unavailable");
        return Err(EngineError::rejected(format!(
            "vehicle {} is {:?}, not available",
            vehicle.name, vehicle.status
        )));
    }

    // All checks passed; bind all three sides.
    if let Some(vehicle) = store.vehicle_mut(vehicle_id) {
        vehicle.status = VehicleStatus::InUse;
        vehicle.current_driver_id = Some(driver_id);
    }
    if let Some(driver) = store.employee_mut(driver_id) {
        driver.current_vehicle_id = Some(vehicle_id);
    }
    let trip = store.trip_mut(trip_id).expect("trip checked above");
    trip.status = TripStatus::Assigned;
    trip.driver_id = Some(driver_id);
    trip.vehicle_id = Some(vehicle_id);
    info!(trip_id, driver_id, vehicle_id, "trip assigned");
    Ok(trip.clone())
}

/// Advances a trip exactly one step along the forward chain. Skipping
/// ahead, moving backward and touching terminal trips are all
/// rejected. `cancelled` must go through `cancel_trip`.
pub fn update_trip_status(
    store: &mut Store,
    trip_id: i64,
    next: TripStatus,
    now: DateTime<Utc>,
) -> Result<DriverTrip, EngineError> {
    let current = store
        .trip(trip_id)
        .map(|t| t.status)
        .ok_or(EngineError::unknown("trip", trip_id))?;
    if current.next() != Some(next) {
        warn!(trip_id, from = ?current, to = ?next, "trip transition rejected");
        return Err(EngineError::transition(format!(
            "trip {current:?} -> {next:?} (one forward step at a time)"
        )));
    }

    let (driver_id, vehicle_id) = {
        let trip = store.trip_mut(trip_id).expect("trip checked above");
        trip.status = next;
        match next {
            TripStatus::GuestPickedUp => trip.picked_up_at = Some(now),
            TripStatus::Completed => trip.completed_at = Some(now),
            _ => {}
        }
        (trip.driver_id, trip.vehicle_id)
    };

    if next == TripStatus::Completed {
        release_binding(store, driver_id, vehicle_id);
    }
    debug!(trip_id, status = ?next, "trip advanced");
    Ok(store.trip(trip_id).expect("trip checked above").clone())
}

/// Cancels a trip from any non-terminal state and returns any bound
/// vehicle to the available pool.
pub fn cancel_trip(store: &mut Store, trip_id: i64) -> Result<DriverTrip, EngineError> {
    let current = store
        .trip(trip_id)
        .map(|t| t.status)
        .ok_or(EngineError::unknown("trip", trip_id))?;
    if current.is_terminal() {
        return Err(EngineError::transition(format!(
            "trip is already {current:?}"
        )));
    }
    let (driver_id, vehicle_id) = {
        let trip = store.trip_mut(trip_id).expect("trip checked above");
        trip.status = TripStatus::Cancelled;
        (trip.driver_id, trip.vehicle_id)
    };
    release_binding(store, driver_id, vehicle_id);
    info!(trip_id, "trip cancelled");
    Ok(store.trip(trip_id).expect("trip checked above").clone())
}

fn release_binding(store: &mut Store, driver_id: Option<i64>, vehicle_id: Option<i64>) {
    if let Some(vehicle_id) = vehicle_id {
        if let Some(vehicle) = store.vehicle_mut(vehicle_id) {
            vehicle.status = VehicleStatus::Available;
            vehicle.current_driver_id = None;
        }
    }
    if let Some(driver_id) = driver_id {
        if let Some(driver) = store.employee_mut(driver_id) {
            driver.current_vehicle_id = None;
        }
    }
}

/// Converts a new transportation request into a pending trip, 1:1.
/// Requests already converted or rejected stay as they are.
pub fn convert_request_to_trip(store: &mut Store, request_id: i64) -> Option<DriverTrip> {
    let request = store
        .transport_requests
        .iter()
        .find(|r| r.request_id == request_id)?
        .clone();
    if request.status != RequestStatus::New {
        debug!(request_id, status = ?request.status, "convert ignored: request not new");
        return None;
    }
    let trip = add_driver_trip(
        store,
        NewTrip {
            trip_type: Some(request.request_type),
            guest_name: Some(request.guest_name),
            pickup_location: Some(request.pickup_location),
            dropoff_location: Some(request.dropoff_location),
            scheduled_time: Some(request.requested_time),
            ..NewTrip::default()
        },
    )?;
    if let Some(request) = store.transport_request_mut(request_id) {
        request.status = RequestStatus::Converted;
    }
    info!(request_id, trip_id = trip.trip_id, "request converted to trip");
    Some(trip)
}

pub fn reject_request(store: &mut Store, request_id: i64) -> bool {
    match store.transport_request_mut(request_id) {
        Some(request) if request.status == RequestStatus::New => {
            request.status = RequestStatus::Rejected;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, TransportationRequest};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).single().unwrap()
    }

    fn driver(store: &mut Store, status: EmployeeStatus) -> i64 {
        let id = store.next_id();
        store.employees.push(Employee {
            employee_id: id,
            name: format!("Driver {id}"),
            department: Department::Drivers,
            role: "Driver".into(),
            status,
            performance_score: 90,
            hours_this_week: 20.0,
            overtime_hours: 0.0,
            skills: Vec::new(),
            certifications: Vec::new(),
            gps_location: None,
            current_vehicle_id: None,
        });
        id
    }

    fn vehicle(store: &mut Store, status: VehicleStatus) -> i64 {
        let id = store.next_id();
        store.vehicles.push(Vehicle {
            vehicle_id: id,
            name: format!("Vehicle {id}"),
            status,
            capacity: 4,
            fuel_level: 80,
            mileage: 10_000,
            next_maintenance_due: chrono::NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            current_driver_id: None,
        });
        id
    }

    fn pending_trip(store: &mut Store) -> i64 {
        add_driver_trip(
            store,
            NewTrip {
                guest_name: Some("Smith".into()),
                pickup_location: Some("Hotel".into()),
                dropoff_location: Some("Airport".into()),
                scheduled_time: Some(now()),
                ..NewTrip::default()
            },
        )
        .unwrap()
        .trip_id
    }

    #[test]
    fn new_trip_starts_pending_and_unassigned() {
        let mut store = Store::new();
        let id = pending_trip(&mut store);
        let trip = store.trip(id).unwrap();
        assert_eq!(trip.status, TripStatus::Pending);
        assert_eq!(trip.driver_id, None);
        assert_eq!(trip.priority, TripPriority::Normal);
        assert_eq!(trip.number_of_guests, 1);
    }

    #[test]
    fn incomplete_trip_input_creates_nothing() {
        let mut store = Store::new();
        let out = add_driver_trip(
            &mut store,
            NewTrip {
                guest_name: Some("Smith".into()),
                ..NewTrip::default()
            },
        );
        assert!(out.is_none());
        assert!(store.trips.is_empty());
    }

    #[test]
    fn assignment_binds_all_three_sides() {
        let mut store = Store::new();
        let d = driver(&mut store, EmployeeStatus::OnDuty);
        let v = vehicle(&mut store, VehicleStatus::Available);
        let t = pending_trip(&mut store);
        let trip = assign_driver_to_trip(&mut store, t, d, v).unwrap();
        assert_eq!(trip.status, TripStatus::Assigned);
        assert_eq!(trip.driver_id, Some(d));
        assert_eq!(store.vehicle(v).unwrap().status, VehicleStatus::InUse);
        assert_eq!(store.vehicle(v).unwrap().current_driver_id, Some(d));
        assert_eq!(store.employee(d).unwrap().current_vehicle_id, Some(v));
    }

    #[test]
    fn off_duty_driver_is_rejected_and_trip_stays_pending() {
        let mut store = Store::new();
        let d = driver(&mut store, EmployeeStatus::OffDuty);
        let v = vehicle(&mut store, VehicleStatus::Available);
        let t = pending_trip(&mut store);
        let err = assign_driver_to_trip(&mut store, t, d, v).unwrap_err();
        assert!(matches!(err, EngineError::AssignmentRejected { .. }));
        assert_eq!(store.trip(t).unwrap().status, TripStatus::Pending);
        assert_eq!(store.vehicle(v).unwrap().status, VehicleStatus::Available);
    }

    #[test]
    fn busy_vehicle_cannot_serve_two_live_trips() {
        let mut store = Store::new();
        let d1 = driver(&mut store, EmployeeStatus::OnDuty);
        let d2 = driver(&mut store, EmployeeStatus::OnDuty);
        let v = vehicle(&mut store, VehicleStatus::Available);
        let t1 = pending_trip(&mut store);
        let t2 = pending_trip(&mut store);
        assign_driver_to_trip(&mut store, t1, d1, v).unwrap();
        let err = assign_driver_to_trip(&mut store, t2, d2, v).unwrap_err();
        assert!(matches!(err, EngineError::AssignmentRejected { .. }));
        let live_bindings = store
            .trips
            .iter()
            .filter(|t| !t.status.is_terminal() && t.vehicle_id == Some(v))
            .count();
        assert_eq!(live_bindings, 1);
    }

    #[test]
    fn non_driver_employee_is_rejected() {
        let mut store = Store::new();
        let id = store.next_id();
        store.employees.push(Employee {
            employee_id: id,
            name: "Front desk".into(),
            department: Department::FrontDesk,
            role: "Receptionist".into(),
            status: EmployeeStatus::OnDuty,
            performance_score: 90,
            hours_this_week: 10.0,
            overtime_hours: 0.0,
            skills: Vec::new(),
            certifications: Vec::new(),
            gps_location: None,
            current_vehicle_id: None,
        });
        let v = vehicle(&mut store, VehicleStatus::Available);
        let t = pending_trip(&mut store);
        assert!(assign_driver_to_trip(&mut store, t, id, v).is_err());
    }

    #[test]
    fn trip_advances_only_one_step() {
        let mut store = Store::new();
        let t = pending_trip(&mut store);
        // pending -> in_progress skips three steps
        assert!(update_trip_status(&mut store, t, TripStatus::InProgress, now()).is_err());
        assert_eq!(store.trip(t).unwrap().status, TripStatus::Pending);
        // the legal path, one step at a time
        for next in [
            TripStatus::Assigned,
            TripStatus::EnRoutePickup,
            TripStatus::GuestPickedUp,
            TripStatus::InProgress,
            TripStatus::Completed,
        ] {
            update_trip_status(&mut store, t, next, now()).unwrap();
        }
        let trip = store.trip(t).unwrap();
        assert_eq!(trip.status, TripStatus::Completed);
        assert_eq!(trip.picked_up_at, Some(now()));
        assert_eq!(trip.completed_at, Some(now()));
    }

    #[test]
    fn backward_moves_are_rejected() {
        let mut store = Store::new();
        let t = pending_trip(&mut store);
        update_trip_status(&mut store, t, TripStatus::Assigned, now()).unwrap();
        assert!(update_trip_status(&mut store, t, TripStatus::Pending, now()).is_err());
    }

    #[test]
    fn completion_releases_vehicle_and_driver() {
        let mut store = Store::new();
        let d = driver(&mut store, EmployeeStatus::OnDuty);
        let v = vehicle(&mut store, VehicleStatus::Available);
        let t = pending_trip(&mut store);
        assign_driver_to_trip(&mut store, t, d, v).unwrap();
        for next in [
            TripStatus::EnRoutePickup,
            TripStatus::GuestPickedUp,
            TripStatus::InProgress,
            TripStatus::Completed,
        ] {
            update_trip_status(&mut store, t, next, now()).unwrap();
        }
        assert_eq!(store.vehicle(v).unwrap().status, VehicleStatus::Available);
        assert_eq!(store.vehicle(v).unwrap().current_driver_id, None);
        assert_eq!(store.employee(d).unwrap().current_vehicle_id, None);
    }

    #[test]
    fn cancel_releases_vehicle_and_rejects_terminal() {
        let mut store = Store::new();
        let d = driver(&mut store, EmployeeStatus::OnDuty);
        let v = vehicle(&mut store, VehicleStatus::Available);
        let t = pending_trip(&mut store);
        assign_driver_to_trip(&mut store, t, d, v).unwrap();
        let trip = cancel_trip(&mut store, t).unwrap();
        assert_eq!(trip.status, TripStatus::Cancelled);
        assert_eq!(store.vehicle(v).unwrap().status, VehicleStatus::Available);
        assert!(cancel_trip(&mut store, t).is_err(), "already terminal");
    }

    #[test]
    fn unknown_trip_ids_are_soft_errors() {
        let mut store = Store::new();
        assert!(update_trip_status(&mut store, 9, TripStatus::Assigned, now())
            .unwrap_err()
            .is_soft());
        assert!(cancel_trip(&mut store, 9).unwrap_err().is_soft());
    }

    #[test]
    fn request_converts_once_into_a_pending_trip() {
        let mut store = Store::new();
        let request_id = store.next_id();
        store.transport_requests.push(TransportationRequest {
            request_id,
            guest_name: "Dr. Huang".into(),
            request_type: TripType::VipTransfer,
            pickup_location: "Hotel".into(),
            dropoff_location: "Opera House".into(),
            requested_time: now(),
            status: RequestStatus::New,
        });
        let trip = convert_request_to_trip(&mut store, request_id).unwrap();
        assert_eq!(trip.status, TripStatus::Pending);
        assert_eq!(trip.trip_type, TripType::VipTransfer);
        assert_eq!(trip.guest_name, "Dr. Huang");
        assert_eq!(
            store.transport_requests[0].status,
            RequestStatus::Converted
        );
        assert!(convert_request_to_trip(&mut store, request_id).is_none());
        assert!(!reject_request(&mut store, request_id), "not new anymore");
    }
}
