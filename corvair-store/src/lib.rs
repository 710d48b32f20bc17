pub mod app_config;
pub mod fleet_repo;
pub mod flight_repo;
pub mod payment_repo;
pub mod seat_repo;
pub mod ticket_repo;
pub mod user_repo;

use std::sync::Arc;

use corvair_core::repository::{
    AirportRepository, CreditCardRepository, FlightRepository, FlightSeatRepository,
    PaymentRepository, PlaneRepository, SeatRepository, TicketRepository, UserRepository,
};

pub use fleet_repo::{MemoryAirportRepository, MemoryPlaneRepository};
pub use flight_repo::MemoryFlightRepository;
pub use payment_repo::MemoryPaymentRepository;
pub use seat_repo::{MemoryFlightSeatRepository, MemorySeatRepository};
pub use ticket_repo::MemoryTicketRepository;
pub use user_repo::{MemoryCreditCardRepository, MemoryUserRepository};

/// One handle per repository, all backed by in-process maps. Cloning is
/// cheap and every clone sees the same state.
#[derive(Clone)]
pub struct MemoryStore {
    pub flights: Arc<dyn FlightRepository>,
    pub flight_seats: Arc<dyn FlightSeatRepository>,
    pub seats: Arc<dyn SeatRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub cards: Arc<dyn CreditCardRepository>,
    pub planes: Arc<dyn PlaneRepository>,
    pub airports: Arc<dyn AirportRepository>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            flights: Arc::new(MemoryFlightRepository::new()),
            flight_seats: Arc::new(MemoryFlightSeatRepository::new()),
            seats: Arc::new(MemorySeatRepository::new()),
            tickets: Arc::new(MemoryTicketRepository::new()),
            payments: Arc::new(MemoryPaymentRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            cards: Arc::new(MemoryCreditCardRepository::new()),
            planes: Arc::new(MemoryPlaneRepository::new()),
            airports: Arc::new(MemoryAirportRepository::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
