// src/store/seed.rs
//
// Deterministic demo data set for local development and the dashboard
// demo. No randomness: the same store comes out of every run.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::models::*;
use crate::store::Store;

fn employee(
    store: &mut Store,
    name: &str,
    department: Department,
    role: &str,
    status: EmployeeStatus,
    performance: i32,
    hours: f64,
    overtime: f64,
    skills: &[&str],
) -> i64 {
    let id = store.next_id();
    store.employees.push(Employee {
        employee_id: id,
        name: name.into(),
        department,
        role: role.into(),
        status,
        performance_score: performance,
        hours_this_week: hours,
        overtime_hours: overtime,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        certifications: Vec::new(),
        gps_location: None,
        current_vehicle_id: None,
    });
    id
}

fn room(
    store: &mut Store,
    number: &str,
    floor: i32,
    room_type: &str,
    cleaning: CleaningStatus,
    occupancy: OccupancyStatus,
    priority: RoomPriority,
) {
    let id = store.next_id();
    store.rooms.push(HousekeepingRoom {
        room_id: id,
        room_number: number.into(),
        floor,
        room_type: room_type.into(),
        cleaning_status: cleaning,
        occupancy_status: occupancy,
        priority,
        assigned_to: None,
        inspection_score: None,
        inspected_by: None,
        maintenance_issues: Vec::new(),
    });
}

fn vehicle(store: &mut Store, name: &str, capacity: i32, fuel: i32, mileage: i64, due: NaiveDate) {
    let id = store.next_id();
    store.vehicles.push(Vehicle {
        vehicle_id: id,
        name: name.into(),
        status: VehicleStatus::Available,
        capacity,
        fuel_level: fuel,
        mileage,
        next_maintenance_due: due,
        current_driver_id: None,
    });
}

/// Build the demo store: a small hotel with a full department roster,
/// two floors of rooms, a four-vehicle fleet and a few open requests.
pub fn demo_store() -> Store {
    let mut store = Store::new();
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).expect("valid date");

    // Housekeeping crew (also registered as attendants below).
    let maria = employee(
        &mut store,
        "Maria Santos",
        Department::Housekeeping,
        "Room Attendant",
        EmployeeStatus::OnDuty,
        94,
        32.0,
        2.0,
        &["deep_clean", "vip_service"],
    );
    let lin = employee(
        &mut store,
        "Lin Wei",
        Department::Housekeeping,
        "Room Attendant",
        EmployeeStatus::OnDuty,
        88,
        36.0,
        4.5,
        &["deep_clean"],
    );
    let ana = employee(
        &mut store,
        "Ana Petrova",
        Department::Housekeeping,
        "Floor Supervisor",
        EmployeeStatus::OnDuty,
        97,
        38.0,
        6.0,
        &["inspection", "training"],
    );
    employee(
        &mut store,
        "Derek Osei",
        Department::FrontDesk,
        "Receptionist",
        EmployeeStatus::OnDuty,
        90,
        30.0,
        0.0,
        &["check_in", "upsell"],
    );
    employee(
        &mut store,
        "Priya Nair",
        Department::FrontDesk,
        "Night Auditor",
        EmployeeStatus::OffDuty,
        85,
        40.0,
        3.0,
        &["audit"],
    );
    employee(
        &mut store,
        "Tom Briggs",
        Department::Maintenance,
        "Technician",
        EmployeeStatus::OnDuty,
        82,
        35.0,
        5.0,
        &["hvac", "plumbing"],
    );
    employee(
        &mut store,
        "Sofia Marino",
        Department::FoodBeverage,
        "Restaurant Manager",
        EmployeeStatus::OnBreak,
        91,
        34.0,
        1.5,
        &["service", "inventory"],
    );
    employee(
        &mut store,
        "Ken Watanabe",
        Department::Security,
        "Security Officer",
        EmployeeStatus::OnDuty,
        89,
        36.0,
        0.0,
        &["cctv", "first_aid"],
    );
    let carlos = employee(
        &mut store,
        "Carlos Mendes",
        Department::Drivers,
        "Driver",
        EmployeeStatus::OnDuty,
        93,
        28.0,
        0.0,
        &["limo", "airport"],
    );
    employee(
        &mut store,
        "Fatima Zahra",
        Department::Drivers,
        "Driver",
        EmployeeStatus::OnDuty,
        95,
        30.0,
        2.0,
        &["shuttle", "vip"],
    );
    employee(
        &mut store,
        "Oleg Ivanov",
        Department::Drivers,
        "Driver",
        EmployeeStatus::OffDuty,
        80,
        40.0,
        8.0,
        &["delivery"],
    );
    employee(
        &mut store,
        "Grace Mwangi",
        Department::Concierge,
        "Concierge",
        EmployeeStatus::OnDuty,
        96,
        32.0,
        0.0,
        &["tours", "reservations"],
    );
    employee(
        &mut store,
        "Elsa Berg",
        Department::Spa,
        "Therapist",
        EmployeeStatus::OnLeave,
        92,
        0.0,
        0.0,
        &["massage"],
    );

    store.attendants.push(HousekeepingAttendant {
        employee_id: maria,
        zone: "A".into(),
        floor: 2,
        rooms_assigned: 0,
        rooms_cleaned: 0,
        avg_cleaning_time: 24.0,
        status: AttendantStatus::Available,
    });
    store.attendants.push(HousekeepingAttendant {
        employee_id: lin,
        zone: "B".into(),
        floor: 3,
        rooms_assigned: 0,
        rooms_cleaned: 0,
        avg_cleaning_time: 27.5,
        status: AttendantStatus::Available,
    });
    store.attendants.push(HousekeepingAttendant {
        employee_id: ana,
        zone: "A".into(),
        floor: 2,
        rooms_assigned: 0,
        rooms_cleaned: 0,
        avg_cleaning_time: 21.0,
        status: AttendantStatus::Inspection,
    });

    // Floor 2
    room(&mut store, "201", 2, "standard", CleaningStatus::Dirty, OccupancyStatus::Checkout, RoomPriority::Checkout);
    room(&mut store, "202", 2, "standard", CleaningStatus::Dirty, OccupancyStatus::Checkout, RoomPriority::EarlyCheckin);
    room(&mut store, "203", 2, "standard", CleaningStatus::Clean, OccupancyStatus::Vacant, RoomPriority::Normal);
    room(&mut store, "204", 2, "deluxe", CleaningStatus::InProgress, OccupancyStatus::Checkout, RoomPriority::Normal);
    room(&mut store, "205", 2, "deluxe", CleaningStatus::Inspected, OccupancyStatus::CheckinExpected, RoomPriority::Vip);
    room(&mut store, "206", 2, "standard", CleaningStatus::DoNotDisturb, OccupancyStatus::Occupied, RoomPriority::Stayover);
    // Floor 3
    room(&mut store, "301", 3, "standard", CleaningStatus::Dirty, OccupancyStatus::Checkout, RoomPriority::Normal);
    room(&mut store, "302", 3, "standard", CleaningStatus::Dirty, OccupancyStatus::Vacant, RoomPriority::Normal);
    room(&mut store, "303", 3, "suite", CleaningStatus::Clean, OccupancyStatus::CheckinExpected, RoomPriority::Vip);
    room(&mut store, "304", 3, "standard", CleaningStatus::OutOfOrder, OccupancyStatus::Vacant, RoomPriority::Normal);
    room(&mut store, "305", 3, "suite", CleaningStatus::Dirty, OccupancyStatus::Checkout, RoomPriority::Checkout);
    room(&mut store, "306", 3, "standard", CleaningStatus::Clean, OccupancyStatus::Occupied, RoomPriority::Stayover);

    if let Some(r) = store.rooms.iter_mut().find(|r| r.room_number == "304") {
        r.maintenance_issues.push("broken AC unit".into());
    }

    vehicle(&mut store, "Shuttle 1", 12, 78, 48_210, d(2026, 10, 15));
    vehicle(&mut store, "Shuttle 2", 12, 22, 61_904, d(2026, 9, 20));
    vehicle(&mut store, "Sedan VIP", 3, 91, 22_340, d(2026, 11, 2));
    vehicle(&mut store, "Van Cargo", 2, 64, 83_120, d(2026, 9, 5));

    let t = |h, min| Utc.with_ymd_and_hms(2026, 8, 30, h, min, 0).single().expect("valid time");
    let trip_id = store.next_id();
    store.trips.push(DriverTrip {
        trip_id,
        trip_type: TripType::AirportPickup,
        status: TripStatus::Pending,
        priority: TripPriority::Vip,
        guest_name: "Mr. Albright".into(),
        pickup_location: "JFK Terminal 4".into(),
        dropoff_location: "Grand Palm Hotel".into(),
        scheduled_time: t(14, 30),
        number_of_guests: 2,
        driver_id: None,
        vehicle_id: None,
        flight_number: Some("BA117".into()),
        flight_status: Some(FlightStatus::Delayed),
        picked_up_at: None,
        completed_at: None,
    });
    let trip_id = store.next_id();
    store.trips.push(DriverTrip {
        trip_id,
        trip_type: TripType::Shuttle,
        status: TripStatus::Pending,
        priority: TripPriority::Normal,
        guest_name: "Conference group".into(),
        pickup_location: "Grand Palm Hotel".into(),
        dropoff_location: "Convention Center".into(),
        scheduled_time: t(15, 0),
        number_of_guests: 10,
        driver_id: None,
        vehicle_id: None,
        flight_number: None,
        flight_status: None,
        picked_up_at: None,
        completed_at: None,
    });
    let trip_id = store.next_id();
    store.trips.push(DriverTrip {
        trip_id,
        trip_type: TripType::AirportDropoff,
        status: TripStatus::Completed,
        priority: TripPriority::Normal,
        guest_name: "Ms. Keller".into(),
        pickup_location: "Grand Palm Hotel".into(),
        dropoff_location: "JFK Terminal 1".into(),
        scheduled_time: t(8, 0),
        number_of_guests: 1,
        driver_id: Some(carlos),
        vehicle_id: None,
        flight_number: Some("DL402".into()),
        flight_status: Some(FlightStatus::OnTime),
        picked_up_at: Some(t(8, 4)),
        completed_at: Some(t(8, 52)),
    });

    let req_id = store.next_id();
    store.transport_requests.push(TransportationRequest {
        request_id: req_id,
        guest_name: "Dr. Huang".into(),
        request_type: TripType::VipTransfer,
        pickup_location: "Grand Palm Hotel".into(),
        dropoff_location: "Opera House".into(),
        requested_time: t(19, 0),
        status: RequestStatus::New,
    });
    let req_id = store.next_id();
    store.transport_requests.push(TransportationRequest {
        request_id: req_id,
        guest_name: "Lopez family".into(),
        request_type: TripType::Tour,
        pickup_location: "Grand Palm Hotel".into(),
        dropoff_location: "Old Town".into(),
        requested_time: t(10, 30),
        status: RequestStatus::New,
    });

    let task_id = store.next_id();
    store.tasks.push(Task {
        task_id,
        title: "Restock minibar 205".into(),
        department: Department::Housekeeping,
        assigned_to: Some(maria),
        status: TaskStatus::Pending,
        priority: TaskPriority::High,
        room_number: Some("205".into()),
        estimated_minutes: Some(10),
    });
    let task_id = store.next_id();
    store.tasks.push(Task {
        task_id,
        title: "Fix AC in 304".into(),
        department: Department::Maintenance,
        assigned_to: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Urgent,
        room_number: Some("304".into()),
        estimated_minutes: Some(90),
    });
    let task_id = store.next_id();
    store.tasks.push(Task {
        task_id,
        title: "Lobby flower delivery".into(),
        department: Department::Concierge,
        assigned_to: None,
        status: TaskStatus::Completed,
        priority: TaskPriority::Low,
        room_number: None,
        estimated_minutes: Some(15),
    });

    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_store_is_deterministic() {
        let a = demo_store();
        let b = demo_store();
        assert_eq!(a.employees.len(), b.employees.len());
        assert_eq!(a.rooms.len(), b.rooms.len());
        assert_eq!(
            a.trips.iter().map(|t| t.trip_id).collect::<Vec<_>>(),
            b.trips.iter().map(|t| t.trip_id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn demo_store_covers_every_department() {
        let store = demo_store();
        for dept in crate::models::Department::ALL {
            assert!(
                store.employees.iter().any(|e| e.department == dept),
                "no employee seeded for {dept:?}"
            );
        }
    }
}
