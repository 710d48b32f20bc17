pub mod ledger;
pub mod miles;
pub mod models;
pub mod transaction;

pub use ledger::SeatLedger;
pub use miles::MileLedger;
pub use models::{BookingReceipt, BookingRequest, SeatRequest};
pub use transaction::BookingEngine;
