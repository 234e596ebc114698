// src/models/mod.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ───────────────────────────────────────
// Workforce
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Housekeeping,
    FrontDesk,
    Maintenance,
    FoodBeverage,
    Security,
    Drivers,
    Concierge,
    Spa,
}

impl Department {
    /// All departments, in dashboard display order.
    pub const ALL: [Department; 8] = [
        Department::Housekeeping,
        Department::FrontDesk,
        Department::Maintenance,
        Department::FoodBeverage,
        Department::Security,
        Department::Drivers,
        Department::Concierge,
        Department::Spa,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    OnDuty,
    OffDuty,
    OnBreak,
    OnLeave,
    Sick,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsLocation {
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    pub name: String,
    pub department: Department,
    pub role: String,
    pub status: EmployeeStatus,
    pub performance_score: i32, // 0..=100
    pub hours_this_week: f64,
    pub overtime_hours: f64,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub gps_location: Option<GpsLocation>,
    pub current_vehicle_id: Option<i64>,
}

// ───────────────────────────────────────
// Shifts
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
    Split,
}

impl ShiftType {
    /// Fixed start/end window for each shift type. Night wraps midnight.
    pub fn window(self) -> (NaiveTime, NaiveTime) {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).expect("valid hour");
        match self {
            ShiftType::Morning => (t(6), t(14)),
            ShiftType::Afternoon => (t(14), t(22)),
            ShiftType::Night => (t(22), t(6)),
            ShiftType::Split => (t(6), t(22)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Scheduled,
    InProgress,
    Completed,
    Missed,
    Swapped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub department: Department,
    pub status: ShiftStatus,
    pub notes: Option<String>,
}

// ───────────────────────────────────────
// Tasks
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Display ordering: urgent > high > medium > low.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::Urgent => 0,
            TaskPriority::High => 1,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    pub title: String,
    pub department: Department,
    pub assigned_to: Option<i64>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub room_number: Option<String>,
    pub estimated_minutes: Option<i32>,
}

// ───────────────────────────────────────
// Housekeeping
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStatus {
    Dirty,
    InProgress,
    Clean,
    Inspected,
    OutOfOrder,
    DoNotDisturb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyStatus {
    Occupied,
    Vacant,
    Checkout,
    CheckinExpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomPriority {
    Vip,
    EarlyCheckin,
    Checkout,
    Stayover,
    Normal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousekeepingRoom {
    pub room_id: i64,
    pub room_number: String,
    pub floor: i32,
    pub room_type: String,
    pub cleaning_status: CleaningStatus,
    pub occupancy_status: OccupancyStatus,
    pub priority: RoomPriority,
    pub assigned_to: Option<i64>, // attendant employee_id
    pub inspection_score: Option<i32>,
    pub inspected_by: Option<String>,
    pub maintenance_issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendantStatus {
    Available,
    Cleaning,
    Break,
    Inspection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousekeepingAttendant {
    pub employee_id: i64,
    pub zone: String,
    pub floor: i32,
    pub rooms_assigned: i32,
    pub rooms_cleaned: i32,
    pub avg_cleaning_time: f64, // minutes
    pub status: AttendantStatus,
}

// ───────────────────────────────────────
// Fleet & dispatch
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
    OutOfService,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub name: String,
    pub status: VehicleStatus,
    pub capacity: i32,
    pub fuel_level: i32, // 0..=100
    pub mileage: i64,
    pub next_maintenance_due: NaiveDate,
    pub current_driver_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    AirportPickup,
    AirportDropoff,
    Shuttle,
    VipTransfer,
    Tour,
    Delivery,
    Errand,
    Event,
}

impl TripType {
    pub fn is_airport(self) -> bool {
        matches!(self, TripType::AirportPickup | TripType::AirportDropoff)
    }

    /// Flat fare implied by the trip type, used for revenue aggregation.
    pub fn fare(self) -> f64 {
        match self {
            TripType::AirportPickup | TripType::AirportDropoff => 45.0,
            TripType::Shuttle => 15.0,
            TripType::VipTransfer => 120.0,
            TripType::Tour => 85.0,
            TripType::Delivery => 20.0,
            TripType::Errand => 25.0,
            TripType::Event => 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Pending,
    Assigned,
    EnRoutePickup,
    GuestPickedUp,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    /// The forward chain, minus cancelled.
    pub const CHAIN: [TripStatus; 6] = [
        TripStatus::Pending,
        TripStatus::Assigned,
        TripStatus::EnRoutePickup,
        TripStatus::GuestPickedUp,
        TripStatus::InProgress,
        TripStatus::Completed,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// The single legal successor on the forward chain, if any.
    pub fn next(self) -> Option<TripStatus> {
        Self::CHAIN
            .iter()
            .position(|s| *s == self)
            .and_then(|i| Self::CHAIN.get(i + 1).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripPriority {
    Normal,
    Priority,
    Vip,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Landed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverTrip {
    pub trip_id: i64,
    pub trip_type: TripType,
    pub status: TripStatus,
    pub priority: TripPriority,
    pub guest_name: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub scheduled_time: DateTime<Utc>,
    pub number_of_guests: i32,
    pub driver_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub flight_number: Option<String>,
    pub flight_status: Option<FlightStatus>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    Converted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportationRequest {
    pub request_id: i64,
    pub guest_name: String,
    pub request_type: TripType,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub requested_time: DateTime<Utc>,
    pub status: RequestStatus,
}

// ───────────────────────────────────────
// Time off
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Denied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub time_off_id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: TimeOffStatus,
}

// ───────────────────────────────────────
// Derived: insights & metric snapshots
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

impl InsightPriority {
    pub fn rank(self) -> u8 {
        match self {
            InsightPriority::High => 0,
            InsightPriority::Medium => 1,
            InsightPriority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: String, // stable per rule, e.g. "pending-trips"
    pub category: String,
    pub title: String,
    pub message: String,
    pub recommendation: String,
    pub priority: InsightPriority,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentMetrics {
    pub department: Department,
    pub on_duty: usize,
    pub off_duty: usize,
    pub on_break: usize,
    pub on_leave: usize,
    pub tasks_pending: usize,
    pub tasks_completed: usize,
    pub avg_performance: f64,
    pub overtime_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousekeepingMetrics {
    pub total_rooms: usize,
    pub dirty: usize,
    pub in_progress: usize,
    pub clean: usize,
    pub inspected: usize,
    pub out_of_order: usize,
    pub do_not_disturb: usize,
    pub rooms_cleaned_today: usize,
    pub completion_rate: f64, // 0..=1
    pub quality_score: f64,   // avg inspection score, 0..=100
    pub avg_cleaning_time: f64,
    pub attendants_available: usize,
    pub attendants_total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverMetrics {
    pub total_drivers: usize,
    pub available_drivers: usize,
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub vehicles_in_use: usize,
    pub pending_trips: usize,
    pub active_trips: usize,
    pub completed_today: usize,
    pub on_time_rate: f64, // 0..=1
    pub avg_wait_minutes: f64,
    pub satisfaction_score: f64, // 60..=100
    pub revenue_today: f64,
}
