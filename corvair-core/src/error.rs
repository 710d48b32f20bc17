use uuid::Uuid;

/// Failure taxonomy surfaced by every engine operation.
///
/// `Conflict` marks an optimistic-lock loss and carries the seat that lost
/// its race so multi-seat batch failures can name the culprit. None of these
/// are retried internally; callers own retry policy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("seat {seat_number} on flight {flight_id} was modified concurrently")]
    Conflict { flight_id: Uuid, seat_number: String },

    #[error("insufficient miles: required {required}, available {available}")]
    InsufficientMiles { required: i64, available: i64 },

    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("validation failed: {0}")]
    Validation(String),
}

impl Error {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// True for optimistic-lock losses, the only failure class a caller
    /// may reasonably retry as-is.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
