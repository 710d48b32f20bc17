pub mod error;
pub mod miles;
pub mod model;
pub mod repository;

pub use error::{Error, Result};
pub use model::flight::{Airport, Flight, FlightStatus, Plane, PlaneStatus};
pub use model::payment::{Payment, PaymentMethod, PaymentStatus};
pub use model::seat::{Availability, FlightSeat, Seat, SeatClass, SeatStatus};
pub use model::ticket::{Ticket, TicketStatus};
pub use model::user::{CreditCard, User};
