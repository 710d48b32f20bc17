use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use corvair_booking::{BookingEngine, BookingReceipt, BookingRequest, SeatRequest};
use corvair_core::{
    Availability, Error, Payment, PaymentMethod, Result, SeatClass, SeatStatus, TicketStatus,
};
use corvair_ops::{CancellationWorkflow, CascadeCoordinator, CascadeReport, FleetOps, TicketSummary};
use corvair_store::app_config::BusinessRules;
use corvair_store::MemoryStore;

use crate::telemetry::Telemetry;

/// One seat in a flight's seat map, joining the sellable row with its
/// cabin template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMapEntry {
    pub seat_number: String,
    pub class: Option<SeatClass>,
    pub physical_status: Option<SeatStatus>,
    pub availability: Availability,
    pub price: i64,
}

/// The engine's boundary: every operation a transport layer may call.
/// Construction wires the booking engine, the cancellation workflow and
/// the cascade coordinator over one shared store.
pub struct ReservationApi {
    store: MemoryStore,
    booking: BookingEngine,
    workflow: Arc<CancellationWorkflow>,
    cascade: CascadeCoordinator,
    fleet: FleetOps,
    telemetry: Telemetry,
}

impl ReservationApi {
    pub fn new(store: MemoryStore, rules: BusinessRules) -> Self {
        let booking = BookingEngine::new(
            store.flights.clone(),
            store.flight_seats.clone(),
            store.seats.clone(),
            store.tickets.clone(),
            store.payments.clone(),
            store.users.clone(),
            store.cards.clone(),
            rules.clone(),
        );
        let workflow = Arc::new(CancellationWorkflow::new(
            store.flights.clone(),
            store.flight_seats.clone(),
            store.seats.clone(),
            store.tickets.clone(),
            store.payments.clone(),
            store.users.clone(),
            rules,
        ));
        let cascade = CascadeCoordinator::new(
            store.flights.clone(),
            store.tickets.clone(),
            store.planes.clone(),
            store.airports.clone(),
            workflow.clone(),
        );
        let fleet = FleetOps::new(store.planes.clone(), store.airports.clone());

        Self {
            store,
            booking,
            workflow,
            cascade,
            fleet,
            telemetry: Telemetry::new(),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Book a batch of seats. `method` is the caller-supplied payment
    /// method string; an unknown value is a validation error.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        method: &str,
        seats: Vec<SeatRequest>,
    ) -> Result<BookingReceipt> {
        let method: PaymentMethod = method.parse()?;
        let receipt = self
            .booking
            .book(BookingRequest {
                user_id,
                method,
                seats,
            })
            .await?;
        self.telemetry.booking_confirmed(&receipt);
        Ok(receipt)
    }

    pub async fn cancel_ticket(&self, ticket_id: Uuid) -> Result<TicketSummary> {
        let summary = self.workflow.cancel(ticket_id).await?;
        self.telemetry.ticket_cancelled(&summary);
        Ok(summary)
    }

    pub async fn check_in(&self, ticket_id: Uuid) -> Result<TicketSummary> {
        let mut ticket = self.store.tickets.get(ticket_id).await?;
        if !ticket.status.can_check_in() {
            return Err(Error::invalid_transition(
                ticket.status,
                TicketStatus::CheckedIn,
            ));
        }
        self.store
            .tickets
            .set_status(ticket_id, TicketStatus::CheckedIn)
            .await?;
        ticket.status = TicketStatus::CheckedIn;
        Ok(TicketSummary::from_ticket(&ticket, None))
    }

    pub async fn cancel_flight(&self, flight_id: Uuid) -> Result<CascadeReport> {
        let report = self.cascade.cancel_flight(flight_id).await?;
        self.telemetry.cascade_completed("flight", flight_id, &report);
        Ok(report)
    }

    pub async fn clear_airport(&self, airport_id: Uuid) -> Result<CascadeReport> {
        let report = self.cascade.clear_airport(airport_id).await?;
        self.telemetry.cascade_completed("airport", airport_id, &report);
        Ok(report)
    }

    pub async fn report_plane_malfunction(
        &self,
        plane_id: Uuid,
        retire: bool,
    ) -> Result<CascadeReport> {
        let report = self.cascade.report_malfunction(plane_id, retire).await?;
        self.telemetry.cascade_completed("plane", plane_id, &report);
        Ok(report)
    }

    pub async fn send_plane_to_maintenance(&self, plane_id: Uuid) -> Result<CascadeReport> {
        let report = self.cascade.send_to_maintenance(plane_id).await?;
        self.telemetry.cascade_completed("plane", plane_id, &report);
        Ok(report)
    }

    pub async fn deploy_plane(&self, plane_id: Uuid, airport_id: Uuid) -> Result<()> {
        self.fleet.deploy_plane(plane_id, airport_id).await.map(|_| ())
    }

    pub async fn reactivate_plane(&self, plane_id: Uuid) -> Result<()> {
        self.fleet.reactivate_plane(plane_id).await.map(|_| ())
    }

    /// All tickets a user ever purchased, newest payment first.
    pub async fn user_tickets(&self, user_id: Uuid) -> Result<Vec<TicketSummary>> {
        let mut summaries = Vec::new();
        for payment in self.store.payments.list_by_user(user_id).await? {
            for ticket in self.store.tickets.list_by_payment(payment.id).await? {
                summaries.push(TicketSummary::from_ticket(&ticket, None));
            }
        }
        Ok(summaries)
    }

    pub async fn user_payments(&self, user_id: Uuid) -> Result<Vec<Payment>> {
        self.store.payments.list_by_user(user_id).await
    }

    /// The seat map of one flight: availability and price per seat,
    /// joined with the cabin template where one exists.
    pub async fn flight_seat_map(&self, flight_id: Uuid) -> Result<Vec<SeatMapEntry>> {
        let flight = self.store.flights.get(flight_id).await?;
        let mut entries = Vec::new();
        for seat in self.store.flight_seats.list_by_flight(flight_id).await? {
            let template = self
                .store
                .seats
                .find(flight.plane_id, &seat.seat_number)
                .await?;
            entries.push(SeatMapEntry {
                seat_number: seat.seat_number,
                class: template.as_ref().map(|t| t.class),
                physical_status: template.as_ref().map(|t| t.status),
                availability: seat.availability,
                price: seat.price,
            });
        }
        Ok(entries)
    }
}
