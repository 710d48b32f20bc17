pub mod flight;
pub mod payment;
pub mod seat;
pub mod ticket;
pub mod user;
