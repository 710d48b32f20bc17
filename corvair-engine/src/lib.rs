pub mod api;
pub mod provision;
pub mod telemetry;

pub use api::{ReservationApi, SeatMapEntry};
pub use provision::Provisioner;
