use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cabin class of a physical seat; drives the mile multiplier and the
/// per-class price applied when a flight's seats are created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

/// Physical condition of a seat template. An `Unavailable` seat exists on
/// the plane but cannot be sold on any flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Active,
    Unavailable,
}

/// Seat template on a plane, keyed by (plane_id, seat_number). Owned by
/// fleet management; read-only input here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub plane_id: Uuid,
    pub seat_number: String,
    pub class: SeatClass,
    pub status: SeatStatus,
}

/// Sellable state of a flight seat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    Reserved,
    Sold,
}

impl Availability {
    /// Allowed transitions: available -> {reserved, sold}, reserved/sold
    /// -> available (release), and reserved -> reserved so a cash booking
    /// may re-hold a pending seat under a fresh version.
    pub fn can_transition_to(&self, to: Availability) -> bool {
        use Availability::*;
        matches!(
            (self, to),
            (Available, Reserved)
                | (Available, Sold)
                | (Reserved, Reserved)
                | (Reserved, Available)
                | (Sold, Available)
        )
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Availability::Available => "AVAILABLE",
            Availability::Reserved => "RESERVED",
            Availability::Sold => "SOLD",
        };
        f.write_str(s)
    }
}

/// The sellable instance of a seat on one flight, keyed by
/// (flight_id, seat_number). `version` increments on every availability
/// mutation and is the sole concurrency-control mechanism: a writer that
/// read version N may only commit if the row is still at N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSeat {
    pub flight_id: Uuid,
    pub seat_number: String,
    pub availability: Availability,
    pub price: i64,
    pub version: u64,
}

impl FlightSeat {
    pub fn new(flight_id: Uuid, seat_number: impl Into<String>, price: i64) -> Self {
        Self {
            flight_id,
            seat_number: seat_number.into(),
            availability: Availability::Available,
            price,
            version: 0,
        }
    }
}
