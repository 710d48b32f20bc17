use serde::{Deserialize, Serialize};
use uuid::Uuid;

use corvair_core::{Payment, PaymentMethod, Ticket};

/// One requested seat within a booking batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRequest {
    pub flight_id: Uuid,
    pub seat_number: String,
    #[serde(default)]
    pub extra_baggage: bool,
    #[serde(default)]
    pub meal_service: bool,
}

impl SeatRequest {
    pub fn new(flight_id: Uuid, seat_number: impl Into<String>) -> Self {
        Self {
            flight_id,
            seat_number: seat_number.into(),
            extra_baggage: false,
            meal_service: false,
        }
    }

    pub fn with_extras(mut self, extra_baggage: bool, meal_service: bool) -> Self {
        self.extra_baggage = extra_baggage;
        self.meal_service = meal_service;
        self
    }
}

/// A multi-seat purchase request. The batch succeeds or fails as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub user_id: Uuid,
    pub method: PaymentMethod,
    pub seats: Vec<SeatRequest>,
}

/// Outcome of a successful booking: the payment and its tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub payment: Payment,
    pub tickets: Vec<Ticket>,
    pub total_amount: i64,
    pub miles_awarded: i64,
}
