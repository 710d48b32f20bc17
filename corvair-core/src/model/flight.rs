use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flight lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Scheduled,
    Active,
    Cancelled,
    Completed,
}

impl FlightStatus {
    /// Terminal flights are skipped by cascade cancellation and refuse
    /// further status flips.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlightStatus::Cancelled | FlightStatus::Completed)
    }

    /// Whether seats on this flight may still be sold.
    pub fn is_open_for_sale(&self) -> bool {
        matches!(self, FlightStatus::Scheduled | FlightStatus::Active)
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlightStatus::Scheduled => "SCHEDULED",
            FlightStatus::Active => "ACTIVE",
            FlightStatus::Cancelled => "CANCELLED",
            FlightStatus::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// A scheduled flight. Owned by flight scheduling; the engine only flips
/// its status during cascade cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub origin_airport_id: Uuid,
    pub destination_airport_id: Uuid,
    pub plane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Base fare for the flight; per-seat prices are derived from this
    /// once, when the flight's seats are created.
    pub base_price: i64,
    pub status: FlightStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaneStatus {
    Active,
    Maintenance,
    Retired,
}

impl std::fmt::Display for PlaneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlaneStatus::Active => "ACTIVE",
            PlaneStatus::Maintenance => "MAINTENANCE",
            PlaneStatus::Retired => "RETIRED",
        };
        f.write_str(s)
    }
}

/// An aircraft in the fleet. `airport_id == None` means the plane sits in
/// storage, detached from operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub id: Uuid,
    pub model_type: String,
    pub status: PlaneStatus,
    pub airport_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub iata_code: String,
    pub name: String,
}
