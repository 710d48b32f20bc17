use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use corvair_booking::BookingReceipt;
use corvair_ops::{CascadeReport, TicketSummary};
use corvair_shared::models::events::{
    BookingConfirmedEvent, CascadeCompletedEvent, TicketCancelledEvent,
};

/// Emits domain events as structured log lines under the
/// `corvair::telemetry` target, where a collector can pick them up.
#[derive(Debug, Clone, Default)]
pub struct Telemetry;

impl Telemetry {
    pub fn new() -> Self {
        Self
    }

    pub fn booking_confirmed(&self, receipt: &BookingReceipt) {
        self.emit(
            "booking_confirmed",
            &BookingConfirmedEvent {
                payment_id: receipt.payment.id,
                user_id: receipt.payment.user_id,
                method: receipt.payment.method.to_string(),
                total_amount: receipt.total_amount,
                seat_count: receipt.tickets.len(),
                timestamp: Utc::now().timestamp(),
            },
        );
    }

    pub fn ticket_cancelled(&self, summary: &TicketSummary) {
        self.emit(
            "ticket_cancelled",
            &TicketCancelledEvent {
                ticket_id: summary.ticket_id,
                flight_id: summary.flight_id,
                seat_number: summary.seat_number.clone(),
                refund_amount: summary.refund_amount.unwrap_or(0),
                timestamp: Utc::now().timestamp(),
            },
        );
    }

    pub fn cascade_completed(&self, scope: &str, scope_id: Uuid, report: &CascadeReport) {
        self.emit(
            "cascade_completed",
            &CascadeCompletedEvent {
                scope: scope.to_string(),
                scope_id,
                flights_cancelled: report.flights_cancelled,
                tickets_cancelled: report.tickets_cancelled,
                tickets_failed: report.tickets_failed,
                timestamp: Utc::now().timestamp(),
            },
        );
    }

    fn emit<T: Serialize>(&self, kind: &str, event: &T) {
        match serde_json::to_string(event) {
            Ok(payload) => tracing::info!(target: "corvair::telemetry", kind, %payload),
            Err(err) => tracing::warn!(kind, error = %err, "failed to serialize telemetry event"),
        }
    }
}
