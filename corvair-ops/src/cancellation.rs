use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use corvair_booking::{MileLedger, SeatLedger};
use corvair_core::repository::{
    FlightRepository, FlightSeatRepository, PaymentRepository, SeatRepository, TicketRepository,
};
use corvair_core::{
    Error, Payment, PaymentMethod, PaymentStatus, Result, Ticket, TicketStatus,
};
use corvair_store::app_config::BusinessRules;

/// Caller-facing view of a ticket after a lifecycle operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSummary {
    pub ticket_id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub status: TicketStatus,
    pub has_extra_baggage: bool,
    pub has_meal_service: bool,
    pub refund_amount: Option<i64>,
}

impl TicketSummary {
    pub fn from_ticket(ticket: &Ticket, refund_amount: Option<i64>) -> Self {
        Self {
            ticket_id: ticket.id,
            flight_id: ticket.flight_id,
            seat_number: ticket.seat_number.clone(),
            status: ticket.status,
            has_extra_baggage: ticket.has_extra_baggage,
            has_meal_service: ticket.has_meal_service,
            refund_amount,
        }
    }
}

/// Reverses one ticket: frees the seat, claws back earned miles, refunds
/// mile-financed purchases, and appends a negative refund payment. All
/// reads happen before the first write, so a missing record aborts the
/// unit with nothing mutated.
pub struct CancellationWorkflow {
    flights: Arc<dyn FlightRepository>,
    flight_seats: Arc<dyn FlightSeatRepository>,
    seat_templates: Arc<dyn SeatRepository>,
    tickets: Arc<dyn TicketRepository>,
    payments: Arc<dyn PaymentRepository>,
    ledger: SeatLedger,
    miles: MileLedger,
    rules: BusinessRules,
}

impl CancellationWorkflow {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        flight_seats: Arc<dyn FlightSeatRepository>,
        seat_templates: Arc<dyn SeatRepository>,
        tickets: Arc<dyn TicketRepository>,
        payments: Arc<dyn PaymentRepository>,
        users: Arc<dyn corvair_core::repository::UserRepository>,
        rules: BusinessRules,
    ) -> Self {
        let ledger = SeatLedger::new(flight_seats.clone());
        let miles = MileLedger::new(users);
        Self {
            flights,
            flight_seats,
            seat_templates,
            tickets,
            payments,
            ledger,
            miles,
            rules,
        }
    }

    pub async fn cancel(&self, ticket_id: Uuid) -> Result<TicketSummary> {
        let mut ticket = self.tickets.get(ticket_id).await?;
        if !ticket.status.can_cancel() {
            return Err(Error::invalid_transition(
                ticket.status,
                TicketStatus::Cancelled,
            ));
        }

        // Gather everything the reversal needs before mutating anything.
        let seat = self
            .flight_seats
            .get(ticket.flight_id, &ticket.seat_number)
            .await?;
        let payment = self.payments.get(ticket.payment_id).await?;
        let flight = self.flights.get(ticket.flight_id).await?;
        let template = self
            .seat_templates
            .find(flight.plane_id, &ticket.seat_number)
            .await?;

        let mut refund = seat.price;
        if ticket.has_extra_baggage {
            refund += self.rules.extra_baggage_price;
        }
        if ticket.has_meal_service {
            refund += self.rules.meal_service_price;
        }

        // Free the seat; a racing new booking simply sees it available
        // under a fresh version.
        self.ledger
            .release(ticket.flight_id, &ticket.seat_number)
            .await?;

        self.tickets
            .set_status(ticket.id, TicketStatus::Cancelled)
            .await?;
        ticket.status = TicketStatus::Cancelled;

        // Claw back what the booking awarded; a missing cabin template
        // earned nothing, so there is nothing to deduct.
        if payment.method.awards_miles() {
            if let Some(template) = &template {
                self.miles
                    .deduct(payment.user_id, seat.price, template.class)
                    .await?;
            }
        }

        // Mile purchases get the refund back onto the balance.
        if payment.method == PaymentMethod::Mile {
            self.miles.credit(payment.user_id, refund).await?;
        }

        let refund_payment = Payment::new(
            payment.user_id,
            payment.method,
            -refund,
            self.rules.currency.clone(),
            PaymentStatus::Refunded,
        );
        self.payments.insert(refund_payment).await?;

        tracing::info!(
            %ticket_id,
            flight_id = %ticket.flight_id,
            seat_number = %ticket.seat_number,
            refund,
            method = %payment.method,
            "ticket cancelled"
        );

        Ok(TicketSummary::from_ticket(&ticket, Some(refund)))
    }
}
