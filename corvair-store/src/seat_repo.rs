use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use corvair_core::repository::{FlightSeatRepository, SeatRepository};
use corvair_core::{Availability, Error, FlightSeat, Result, Seat};

/// Sellable flight-seat rows keyed by (flight_id, seat_number). All
/// version checks happen under the single write lock, so concurrent
/// compare-and-transition calls serialize and exactly one of two racing
/// writers observes a matching version.
pub struct MemoryFlightSeatRepository {
    inner: RwLock<HashMap<(Uuid, String), FlightSeat>>,
}

impl MemoryFlightSeatRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryFlightSeatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightSeatRepository for MemoryFlightSeatRepository {
    async fn get(&self, flight_id: Uuid, seat_number: &str) -> Result<FlightSeat> {
        self.inner
            .read()
            .await
            .get(&(flight_id, seat_number.to_string()))
            .cloned()
            .ok_or_else(|| Error::not_found("flight seat", format!("{flight_id}/{seat_number}")))
    }

    async fn insert(&self, seat: FlightSeat) -> Result<()> {
        self.inner
            .write()
            .await
            .insert((seat.flight_id, seat.seat_number.clone()), seat);
        Ok(())
    }

    async fn list_by_flight(&self, flight_id: Uuid) -> Result<Vec<FlightSeat>> {
        let mut seats: Vec<FlightSeat> = self
            .inner
            .read()
            .await
            .values()
            .filter(|s| s.flight_id == flight_id)
            .cloned()
            .collect();
        seats.sort_by(|a, b| a.seat_number.cmp(&b.seat_number));
        Ok(seats)
    }

    async fn compare_and_transition(
        &self,
        flight_id: Uuid,
        seat_number: &str,
        expected_version: u64,
        to: Availability,
    ) -> Result<u64> {
        let mut map = self.inner.write().await;
        let seat = map
            .get_mut(&(flight_id, seat_number.to_string()))
            .ok_or_else(|| Error::not_found("flight seat", format!("{flight_id}/{seat_number}")))?;

        if seat.version != expected_version {
            return Err(Error::Conflict {
                flight_id,
                seat_number: seat_number.to_string(),
            });
        }

        if !seat.availability.can_transition_to(to) {
            return Err(Error::invalid_transition(seat.availability, to));
        }

        seat.availability = to;
        seat.version += 1;
        Ok(seat.version)
    }

    async fn release(&self, flight_id: Uuid, seat_number: &str) -> Result<u64> {
        let mut map = self.inner.write().await;
        let seat = map
            .get_mut(&(flight_id, seat_number.to_string()))
            .ok_or_else(|| Error::not_found("flight seat", format!("{flight_id}/{seat_number}")))?;

        seat.availability = Availability::Available;
        seat.version += 1;
        Ok(seat.version)
    }
}

/// Seat templates keyed by (plane_id, seat_number).
pub struct MemorySeatRepository {
    inner: RwLock<HashMap<(Uuid, String), Seat>>,
}

impl MemorySeatRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySeatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeatRepository for MemorySeatRepository {
    async fn find(&self, plane_id: Uuid, seat_number: &str) -> Result<Option<Seat>> {
        Ok(self
            .inner
            .read()
            .await
            .get(&(plane_id, seat_number.to_string()))
            .cloned())
    }

    async fn insert_all(&self, seats: Vec<Seat>) -> Result<()> {
        let mut map = self.inner.write().await;
        for seat in seats {
            map.insert((seat.plane_id, seat.seat_number.clone()), seat);
        }
        Ok(())
    }

    async fn list_by_plane(&self, plane_id: Uuid) -> Result<Vec<Seat>> {
        let mut seats: Vec<Seat> = self
            .inner
            .read()
            .await
            .values()
            .filter(|s| s.plane_id == plane_id)
            .cloned()
            .collect();
        seats.sort_by(|a, b| a.seat_number.cmp(&b.seat_number));
        Ok(seats)
    }
}
