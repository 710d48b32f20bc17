pub mod cancellation;
pub mod cascade;
pub mod fleet;

pub use cancellation::{CancellationWorkflow, TicketSummary};
pub use cascade::{CascadeCoordinator, CascadeReport};
pub use fleet::FleetOps;
