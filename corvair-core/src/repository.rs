use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::model::flight::{Airport, Flight, FlightStatus, Plane, PlaneStatus};
use crate::model::payment::Payment;
use crate::model::seat::{Availability, FlightSeat, Seat};
use crate::model::ticket::{Ticket, TicketStatus};
use crate::model::user::{CreditCard, User};

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Flight>;

    async fn insert(&self, flight: Flight) -> Result<()>;

    async fn set_status(&self, id: Uuid, status: FlightStatus) -> Result<()>;

    async fn list_by_plane(&self, plane_id: Uuid) -> Result<Vec<Flight>>;

    /// Flights touching an airport as origin or destination.
    async fn list_by_airport(&self, airport_id: Uuid) -> Result<Vec<Flight>>;
}

/// Repository trait for the sellable flight-seat rows. The
/// compare-and-transition operation is the engine's only concurrency
/// control: it must check the expected version and apply the new
/// availability atomically with respect to all other seat writes.
#[async_trait]
pub trait FlightSeatRepository: Send + Sync {
    async fn get(&self, flight_id: Uuid, seat_number: &str) -> Result<FlightSeat>;

    async fn insert(&self, seat: FlightSeat) -> Result<()>;

    async fn list_by_flight(&self, flight_id: Uuid) -> Result<Vec<FlightSeat>>;

    /// Atomically move the seat to `to` if its stored version still equals
    /// `expected_version` and the transition is legal. Returns the new
    /// version; `Error::Conflict` on a version mismatch, with no side
    /// effects.
    async fn compare_and_transition(
        &self,
        flight_id: Uuid,
        seat_number: &str,
        expected_version: u64,
        to: Availability,
    ) -> Result<u64>;

    /// Unconditionally return the seat to `Available`, bumping the
    /// version. Idempotent when the seat is already available.
    async fn release(&self, flight_id: Uuid, seat_number: &str) -> Result<u64>;
}

/// Repository trait for seat templates (per-plane cabin definitions).
#[async_trait]
pub trait SeatRepository: Send + Sync {
    /// `None` when the plane's cabin map lacks the seat; callers treat a
    /// missing template as zero-mile, not as an error.
    async fn find(&self, plane_id: Uuid, seat_number: &str) -> Result<Option<Seat>>;

    async fn insert_all(&self, seats: Vec<Seat>) -> Result<()>;

    async fn list_by_plane(&self, plane_id: Uuid) -> Result<Vec<Seat>>;
}

/// Repository trait for tickets
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Ticket>;

    async fn insert(&self, ticket: Ticket) -> Result<()>;

    async fn set_status(&self, id: Uuid, status: TicketStatus) -> Result<()>;

    async fn list_by_flight(&self, flight_id: Uuid) -> Result<Vec<Ticket>>;

    async fn list_by_payment(&self, payment_id: Uuid) -> Result<Vec<Ticket>>;
}

/// Repository trait for payments (append-only)
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Payment>;

    async fn insert(&self, payment: Payment) -> Result<()>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>>;
}

/// Repository trait for user accounts and their mile balances. The three
/// mile operations are each atomic with respect to one another.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<User>;

    async fn insert(&self, user: User) -> Result<()>;

    /// Add miles; returns the new balance.
    async fn credit_miles(&self, user_id: Uuid, amount: i64) -> Result<i64>;

    /// Subtract miles, clamping at zero. Returns the new balance and
    /// never fails on shortfall.
    async fn deduct_miles_clamped(&self, user_id: Uuid, amount: i64) -> Result<i64>;

    /// Check-and-subtract in one step: fails with
    /// `Error::InsufficientMiles` when the balance cannot cover `amount`.
    async fn try_debit_miles(&self, user_id: Uuid, amount: i64) -> Result<i64>;
}

/// Repository trait for stored cards
#[async_trait]
pub trait CreditCardRepository: Send + Sync {
    async fn find_for_user(&self, user_id: Uuid) -> Result<Option<CreditCard>>;

    async fn insert(&self, card: CreditCard) -> Result<()>;
}

/// Repository trait for the plane fleet
#[async_trait]
pub trait PlaneRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Plane>;

    async fn insert(&self, plane: Plane) -> Result<()>;

    async fn set_status(&self, id: Uuid, status: PlaneStatus) -> Result<()>;

    /// Attach to an airport, or detach to storage with `None`.
    async fn set_airport(&self, id: Uuid, airport_id: Option<Uuid>) -> Result<()>;

    async fn list_by_airport(&self, airport_id: Uuid) -> Result<Vec<Plane>>;
}

/// Repository trait for airports
#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Airport>;

    async fn insert(&self, airport: Airport) -> Result<()>;
}
