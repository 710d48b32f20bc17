use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use corvair_core::repository::{
    AirportRepository, FlightRepository, PlaneRepository, TicketRepository,
};
use corvair_core::{Error, Flight, FlightStatus, PlaneStatus, Result};

use crate::cancellation::CancellationWorkflow;

/// Aggregate outcome of a cascade. Failed tickets were attempted and
/// rejected (for instance by a concurrent mutation); they never abort the
/// rest of the cascade.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CascadeReport {
    pub flights_cancelled: u32,
    pub tickets_cancelled: u32,
    pub tickets_failed: u32,
}

/// Drives the cancellation workflow across every ticket of a disruption
/// scope: one flight, every flight of a plane, or every flight touching
/// an airport. Each per-ticket cancellation is atomic; the cascade as a
/// whole is deliberately not.
pub struct CascadeCoordinator {
    flights: Arc<dyn FlightRepository>,
    tickets: Arc<dyn TicketRepository>,
    planes: Arc<dyn PlaneRepository>,
    airports: Arc<dyn AirportRepository>,
    workflow: Arc<CancellationWorkflow>,
}

impl CascadeCoordinator {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        tickets: Arc<dyn TicketRepository>,
        planes: Arc<dyn PlaneRepository>,
        airports: Arc<dyn AirportRepository>,
        workflow: Arc<CancellationWorkflow>,
    ) -> Self {
        Self {
            flights,
            tickets,
            planes,
            airports,
            workflow,
        }
    }

    /// Cancel one flight and refund its live tickets.
    pub async fn cancel_flight(&self, flight_id: Uuid) -> Result<CascadeReport> {
        let flight = self.flights.get(flight_id).await?;
        if flight.status.is_terminal() {
            return Err(Error::invalid_transition(
                flight.status,
                FlightStatus::Cancelled,
            ));
        }

        let mut report = CascadeReport::default();
        self.cancel_flight_tickets(&flight, &mut report).await?;

        tracing::info!(
            %flight_id,
            tickets_cancelled = report.tickets_cancelled,
            tickets_failed = report.tickets_failed,
            "flight cancelled"
        );
        Ok(report)
    }

    /// Cancel every live flight touching an airport and pull all planes
    /// there into storage.
    pub async fn clear_airport(&self, airport_id: Uuid) -> Result<CascadeReport> {
        self.airports.get(airport_id).await?;

        let related = self.flights.list_by_airport(airport_id).await?;
        let mut report = CascadeReport::default();

        for flight in &related {
            if flight.status.is_terminal() {
                continue;
            }
            if let Err(err) = self.cancel_flight_tickets(flight, &mut report).await {
                tracing::error!(flight_id = %flight.id, error = %err, "cascade skipped flight");
            }
        }

        // Planes serving the cancelled flights go to storage, then
        // whatever else is still parked at the airport.
        for flight in &related {
            if let Ok(plane) = self.planes.get(flight.plane_id).await {
                if plane.airport_id.is_some() {
                    self.planes.set_airport(plane.id, None).await?;
                }
            }
        }
        for plane in self.planes.list_by_airport(airport_id).await? {
            self.planes.set_airport(plane.id, None).await?;
        }

        tracing::info!(
            %airport_id,
            flights_cancelled = report.flights_cancelled,
            tickets_cancelled = report.tickets_cancelled,
            tickets_failed = report.tickets_failed,
            "airport cleared"
        );
        Ok(report)
    }

    /// Ground a plane after a malfunction: cancel its live flights, set
    /// it to maintenance (or retire it for good) and move it to storage.
    pub async fn report_malfunction(&self, plane_id: Uuid, retire: bool) -> Result<CascadeReport> {
        let plane = self.planes.get(plane_id).await?;
        if plane.status == PlaneStatus::Retired {
            return Err(Error::invalid_transition(
                PlaneStatus::Retired,
                if retire {
                    PlaneStatus::Retired
                } else {
                    PlaneStatus::Maintenance
                },
            ));
        }

        let mut report = CascadeReport::default();
        for flight in self.flights.list_by_plane(plane_id).await? {
            if !flight.status.is_open_for_sale() {
                tracing::debug!(flight_id = %flight.id, status = %flight.status, "skipping flight");
                continue;
            }
            if let Err(err) = self.cancel_flight_tickets(&flight, &mut report).await {
                tracing::error!(flight_id = %flight.id, error = %err, "cascade skipped flight");
            }
        }

        let new_status = if retire {
            PlaneStatus::Retired
        } else {
            PlaneStatus::Maintenance
        };
        self.planes.set_status(plane_id, new_status).await?;
        self.planes.set_airport(plane_id, None).await?;

        tracing::info!(
            %plane_id,
            status = %new_status,
            flights_cancelled = report.flights_cancelled,
            tickets_cancelled = report.tickets_cancelled,
            tickets_failed = report.tickets_failed,
            "plane grounded"
        );
        Ok(report)
    }

    /// Pull a plane out of service without retiring it.
    pub async fn send_to_maintenance(&self, plane_id: Uuid) -> Result<CascadeReport> {
        self.report_malfunction(plane_id, false).await
    }

    /// Cancel every live ticket of one flight, tolerating per-ticket
    /// failures, then flip the flight itself. The flight flips even when
    /// some tickets could not be refunded.
    async fn cancel_flight_tickets(
        &self,
        flight: &Flight,
        report: &mut CascadeReport,
    ) -> Result<()> {
        for ticket in self.tickets.list_by_flight(flight.id).await? {
            if ticket.status.is_terminal() {
                continue;
            }
            match self.workflow.cancel(ticket.id).await {
                Ok(_) => report.tickets_cancelled += 1,
                Err(err) => {
                    tracing::error!(
                        ticket_id = %ticket.id,
                        error = %err,
                        "could not cancel ticket, continuing"
                    );
                    report.tickets_failed += 1;
                }
            }
        }

        self.flights
            .set_status(flight.id, FlightStatus::Cancelled)
            .await?;
        report.flights_cancelled += 1;
        Ok(())
    }
}
