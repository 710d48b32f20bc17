use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Booked,
    /// Cash booking awaiting external settlement.
    Pending,
    CheckedIn,
    Cancelled,
    Completed,
}

impl TicketStatus {
    /// Only live, not-yet-flown tickets can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, TicketStatus::Booked | TicketStatus::Pending)
    }

    pub fn can_check_in(&self) -> bool {
        matches!(self, TicketStatus::Booked | TicketStatus::Pending)
    }

    /// Terminal tickets are skipped by cascade cancellation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Cancelled | TicketStatus::Completed)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TicketStatus::Booked => "BOOKED",
            TicketStatus::Pending => "PENDING",
            TicketStatus::CheckedIn => "CHECKED_IN",
            TicketStatus::Cancelled => "CANCELLED",
            TicketStatus::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// One issued ticket, tied to a single payment and pointing at the
/// flight seat it occupies. Tickets are never deleted; cancellation is a
/// status flip plus a refund payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub issue_time: DateTime<Utc>,
    pub status: TicketStatus,
    pub has_extra_baggage: bool,
    pub has_meal_service: bool,
}

impl Ticket {
    pub fn new(
        payment_id: Uuid,
        flight_id: Uuid,
        seat_number: impl Into<String>,
        status: TicketStatus,
        has_extra_baggage: bool,
        has_meal_service: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_id,
            flight_id,
            seat_number: seat_number.into(),
            issue_time: Utc::now(),
            status,
            has_extra_baggage,
            has_meal_service,
        }
    }
}
