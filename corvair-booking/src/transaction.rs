use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use corvair_core::repository::{
    CreditCardRepository, FlightRepository, FlightSeatRepository, PaymentRepository,
    SeatRepository, TicketRepository, UserRepository,
};
use corvair_core::{
    Availability, Error, Payment, PaymentMethod, PaymentStatus, Result, SeatClass, SeatStatus,
    Ticket, TicketStatus,
};
use corvair_store::app_config::BusinessRules;

use crate::ledger::SeatLedger;
use crate::miles::MileLedger;
use crate::models::{BookingReceipt, BookingRequest, SeatRequest};

/// Per-seat snapshot taken during validation. The version recorded here
/// is what the later compare-and-set must still observe.
struct SeatPlan {
    flight_id: Uuid,
    seat_number: String,
    version: u64,
    price: i64,
    class: Option<SeatClass>,
    extra_baggage: bool,
    meal_service: bool,
    line_total: i64,
}

/// The booking transaction: validates a whole batch, applies the payment
/// method's seat and mile effects, and persists one Payment plus one
/// Ticket per seat. If any seat loses its optimistic-lock race the whole
/// batch is rolled back and `Conflict` names the losing seat.
pub struct BookingEngine {
    flights: Arc<dyn FlightRepository>,
    flight_seats: Arc<dyn FlightSeatRepository>,
    seat_templates: Arc<dyn SeatRepository>,
    tickets: Arc<dyn TicketRepository>,
    payments: Arc<dyn PaymentRepository>,
    users: Arc<dyn UserRepository>,
    cards: Arc<dyn CreditCardRepository>,
    ledger: SeatLedger,
    miles: MileLedger,
    rules: BusinessRules,
}

impl BookingEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        flight_seats: Arc<dyn FlightSeatRepository>,
        seat_templates: Arc<dyn SeatRepository>,
        tickets: Arc<dyn TicketRepository>,
        payments: Arc<dyn PaymentRepository>,
        users: Arc<dyn UserRepository>,
        cards: Arc<dyn CreditCardRepository>,
        rules: BusinessRules,
    ) -> Self {
        let ledger = SeatLedger::new(flight_seats.clone());
        let miles = MileLedger::new(users.clone());
        Self {
            flights,
            flight_seats,
            seat_templates,
            tickets,
            payments,
            users,
            cards,
            ledger,
            miles,
            rules,
        }
    }

    pub async fn book(&self, request: BookingRequest) -> Result<BookingReceipt> {
        if request.seats.is_empty() {
            return Err(Error::Validation("booking request contains no seats".into()));
        }

        let mut seen = HashSet::new();
        for seat in &request.seats {
            if !seen.insert((seat.flight_id, seat.seat_number.clone())) {
                return Err(Error::Validation(format!(
                    "seat {} requested twice in one batch",
                    seat.seat_number
                )));
            }
        }

        let user = self.users.get(request.user_id).await?;

        let plans = self.plan_seats(&request).await?;
        let total: i64 = plans.iter().map(|p| p.line_total).sum();

        // Method preconditions, checked before any seat is touched.
        match request.method {
            PaymentMethod::Card => {
                self.cards
                    .find_for_user(user.id)
                    .await?
                    .ok_or_else(|| Error::Validation("no credit card on file".into()))?;
            }
            PaymentMethod::Mile => {
                if user.mile < total {
                    return Err(Error::InsufficientMiles {
                        required: total,
                        available: user.mile,
                    });
                }
            }
            PaymentMethod::Cash => {}
        }

        // Cash holds the seats pending settlement; card and mile sell them.
        let target = match request.method {
            PaymentMethod::Cash => Availability::Reserved,
            _ => Availability::Sold,
        };

        let mut transitioned: Vec<(Uuid, String)> = Vec::new();
        for plan in &plans {
            match self
                .ledger
                .try_reserve(plan.flight_id, &plan.seat_number, plan.version, target)
                .await
            {
                Ok(_) => transitioned.push((plan.flight_id, plan.seat_number.clone())),
                Err(err) => {
                    tracing::warn!(
                        flight_id = %plan.flight_id,
                        seat_number = %plan.seat_number,
                        "seat lost its race, rolling back batch"
                    );
                    self.rollback(&transitioned).await;
                    return Err(err);
                }
            }
        }

        // Mile purchases debit the full total; the balance may have moved
        // since the precheck, so the debit re-verifies atomically.
        if request.method == PaymentMethod::Mile {
            if let Err(err) = self.miles.try_debit(user.id, total).await {
                self.rollback(&transitioned).await;
                return Err(err);
            }
        }

        let miles_awarded = if request.method.awards_miles() {
            let earning: Vec<(i64, SeatClass)> = plans
                .iter()
                .filter_map(|p| p.class.map(|class| (p.price, class)))
                .collect();
            self.miles.award(user.id, &earning).await?
        } else {
            0
        };

        let (payment_status, ticket_status) = match request.method {
            PaymentMethod::Cash => (PaymentStatus::Pending, TicketStatus::Pending),
            _ => (PaymentStatus::Paid, TicketStatus::Booked),
        };

        let payment = Payment::new(
            user.id,
            request.method,
            total,
            self.rules.currency.clone(),
            payment_status,
        );
        self.payments.insert(payment.clone()).await?;

        let mut tickets = Vec::with_capacity(plans.len());
        for plan in &plans {
            let ticket = Ticket::new(
                payment.id,
                plan.flight_id,
                plan.seat_number.clone(),
                ticket_status,
                plan.extra_baggage,
                plan.meal_service,
            );
            self.tickets.insert(ticket.clone()).await?;
            tickets.push(ticket);
        }

        tracing::info!(
            payment_id = %payment.id,
            user_id = %user.id,
            method = %request.method,
            total,
            seats = tickets.len(),
            "booking confirmed"
        );

        Ok(BookingReceipt {
            payment,
            tickets,
            total_amount: total,
            miles_awarded,
        })
    }

    /// Validate every requested seat and snapshot its version and price.
    /// The whole batch fails here if any seat is unsellable.
    async fn plan_seats(&self, request: &BookingRequest) -> Result<Vec<SeatPlan>> {
        let mut plans = Vec::with_capacity(request.seats.len());

        for req in &request.seats {
            let flight = self.flights.get(req.flight_id).await?;
            if !flight.status.is_open_for_sale() {
                return Err(Error::Validation(format!(
                    "flight {} is {} and not open for sale",
                    flight.id, flight.status
                )));
            }

            let seat = self.flight_seats.get(req.flight_id, &req.seat_number).await?;
            match seat.availability {
                Availability::Sold => {
                    return Err(Error::Conflict {
                        flight_id: req.flight_id,
                        seat_number: req.seat_number.clone(),
                    });
                }
                Availability::Reserved if request.method != PaymentMethod::Cash => {
                    return Err(Error::Conflict {
                        flight_id: req.flight_id,
                        seat_number: req.seat_number.clone(),
                    });
                }
                _ => {}
            }

            let template = self
                .seat_templates
                .find(flight.plane_id, &req.seat_number)
                .await?;
            if let Some(t) = &template {
                if t.status == SeatStatus::Unavailable {
                    return Err(Error::Validation(format!(
                        "seat {} is physically unavailable",
                        req.seat_number
                    )));
                }
            }

            plans.push(SeatPlan {
                flight_id: req.flight_id,
                seat_number: req.seat_number.clone(),
                version: seat.version,
                price: seat.price,
                class: template.map(|t| t.class),
                extra_baggage: req.extra_baggage,
                meal_service: req.meal_service,
                line_total: self.line_total(seat.price, req),
            });
        }

        Ok(plans)
    }

    fn line_total(&self, price: i64, req: &SeatRequest) -> i64 {
        let mut total = price;
        if req.extra_baggage {
            total += self.rules.extra_baggage_price;
        }
        if req.meal_service {
            total += self.rules.meal_service_price;
        }
        total
    }

    /// Undo the seat transitions of a batch that lost its race. Payments,
    /// tickets and miles have not been written yet at any rollback site.
    async fn rollback(&self, transitioned: &[(Uuid, String)]) {
        for (flight_id, seat_number) in transitioned {
            if let Err(err) = self.ledger.release(*flight_id, seat_number).await {
                tracing::error!(
                    %flight_id,
                    seat_number,
                    error = %err,
                    "rollback failed to release seat"
                );
            }
        }
    }
}
