use std::sync::Arc;
use uuid::Uuid;

use corvair_core::repository::FlightSeatRepository;
use corvair_core::{Availability, Error, Result};

/// Seat availability operations guarded by optimistic versioning.
///
/// No locks are held across a request: callers read a seat, remember its
/// version, and commit through `try_reserve`. A version mismatch means
/// another booking won the race and surfaces as `Conflict` with no side
/// effects; the caller retries or reports it.
#[derive(Clone)]
pub struct SeatLedger {
    seats: Arc<dyn FlightSeatRepository>,
}

impl SeatLedger {
    pub fn new(seats: Arc<dyn FlightSeatRepository>) -> Self {
        Self { seats }
    }

    /// Move a seat to `Reserved` or `Sold` if its version still matches
    /// `expected_version`. Returns the new version.
    pub async fn try_reserve(
        &self,
        flight_id: Uuid,
        seat_number: &str,
        expected_version: u64,
        to: Availability,
    ) -> Result<u64> {
        if to == Availability::Available {
            return Err(Error::Validation(
                "try_reserve cannot release a seat; use release".into(),
            ));
        }

        let version = self
            .seats
            .compare_and_transition(flight_id, seat_number, expected_version, to)
            .await?;
        tracing::debug!(%flight_id, seat_number, version, state = %to, "seat transitioned");
        Ok(version)
    }

    /// Return a seat to `Available`, bumping its version. Idempotent; a
    /// racing new booking will simply observe the seat available under a
    /// fresh version.
    pub async fn release(&self, flight_id: Uuid, seat_number: &str) -> Result<u64> {
        let version = self.seats.release(flight_id, seat_number).await?;
        tracing::debug!(%flight_id, seat_number, version, "seat released");
        Ok(version)
    }
}
