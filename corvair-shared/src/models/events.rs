use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub payment_id: Uuid,
    pub user_id: Uuid,
    pub method: String,
    pub total_amount: i64,
    pub seat_count: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct TicketCancelledEvent {
    pub ticket_id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub refund_amount: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CascadeCompletedEvent {
    pub scope: String,
    pub scope_id: Uuid,
    pub flights_cancelled: u32,
    pub tickets_cancelled: u32,
    pub tickets_failed: u32,
    pub timestamp: i64,
}
