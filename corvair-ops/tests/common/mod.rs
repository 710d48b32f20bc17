use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use corvair_booking::{BookingEngine, BookingRequest, SeatRequest};
use corvair_core::model::seat::FlightSeat;
use corvair_core::{
    Airport, CreditCard, Flight, FlightStatus, PaymentMethod, Plane, PlaneStatus, Seat, SeatClass,
    SeatStatus, User,
};
use corvair_ops::{CancellationWorkflow, CascadeCoordinator};
use corvair_store::app_config::BusinessRules;
use corvair_store::MemoryStore;

/// Fully wired engine over one airport pair, one plane, and one flight.
/// Seats 1A/1B are business at 1000; 10C-10F are economy at 500.
pub struct World {
    pub store: MemoryStore,
    pub booking: BookingEngine,
    pub workflow: Arc<CancellationWorkflow>,
    pub cascade: CascadeCoordinator,
    pub user_id: Uuid,
    pub origin_id: Uuid,
    pub destination_id: Uuid,
    pub plane_id: Uuid,
    pub flight_id: Uuid,
}

pub const BUSINESS_SEATS: [&str; 2] = ["1A", "1B"];
pub const ECONOMY_SEATS: [&str; 4] = ["10C", "10D", "10E", "10F"];

pub async fn world() -> World {
    let store = MemoryStore::new();
    let rules = BusinessRules::default();

    let origin = Airport {
        id: Uuid::new_v4(),
        iata_code: "IST".into(),
        name: "Istanbul".into(),
    };
    let destination = Airport {
        id: Uuid::new_v4(),
        iata_code: "ESB".into(),
        name: "Ankara".into(),
    };
    let origin_id = origin.id;
    let destination_id = destination.id;
    store.airports.insert(origin).await.unwrap();
    store.airports.insert(destination).await.unwrap();

    let plane = Plane {
        id: Uuid::new_v4(),
        model_type: "737-800".into(),
        status: PlaneStatus::Active,
        airport_id: Some(origin_id),
    };
    let plane_id = plane.id;
    store.planes.insert(plane).await.unwrap();

    let mut templates = Vec::new();
    for seat_number in BUSINESS_SEATS {
        templates.push(Seat {
            plane_id,
            seat_number: seat_number.into(),
            class: SeatClass::Business,
            status: SeatStatus::Active,
        });
    }
    for seat_number in ECONOMY_SEATS {
        templates.push(Seat {
            plane_id,
            seat_number: seat_number.into(),
            class: SeatClass::Economy,
            status: SeatStatus::Active,
        });
    }
    store.seats.insert_all(templates).await.unwrap();

    let flight_id = schedule_flight(&store, plane_id, origin_id, destination_id).await;

    let mut user = User::new("Derya", "Tan", "derya@example.com");
    let user_id = user.id;
    user.mile = 0;
    store.users.insert(user).await.unwrap();
    store
        .cards
        .insert(CreditCard {
            user_id,
            card_num: "4111111111111111".into(),
            holder_name: "Derya Tan".into(),
            expiry: "12/29".into(),
        })
        .await
        .unwrap();

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

    World {
        store,
        booking,
        workflow,
        cascade,
        user_id,
        origin_id,
        destination_id,
        plane_id,
        flight_id,
    }
}

/// Add another flight on the same plane and seat map.
pub async fn schedule_flight(
    store: &MemoryStore,
    plane_id: Uuid,
    origin_id: Uuid,
    destination_id: Uuid,
) -> Uuid {
    let flight_id = Uuid::new_v4();
    let now = Utc::now();
    store
        .flights
        .insert(Flight {
            id: flight_id,
            origin_airport_id: origin_id,
            destination_airport_id: destination_id,
            plane_id,
            departure_time: now + Duration::hours(12),
            arrival_time: now + Duration::hours(13),
            base_price: 1000,
            status: FlightStatus::Scheduled,
        })
        .await
        .unwrap();

    for seat_number in BUSINESS_SEATS {
        store
            .flight_seats
            .insert(FlightSeat::new(flight_id, seat_number, 1000))
            .await
            .unwrap();
    }
    for seat_number in ECONOMY_SEATS {
        store
            .flight_seats
            .insert(FlightSeat::new(flight_id, seat_number, 500))
            .await
            .unwrap();
    }

    flight_id
}

/// Book seats on a flight and return the ticket ids in request order.
pub async fn book_seats(
    world: &World,
    flight_id: Uuid,
    method: PaymentMethod,
    seats: &[&str],
) -> Vec<Uuid> {
    let receipt = world
        .booking
        .book(BookingRequest {
            user_id: world.user_id,
            method,
            seats: seats
                .iter()
                .map(|s| SeatRequest::new(flight_id, *s))
                .collect(),
        })
        .await
        .unwrap();
    receipt.tickets.iter().map(|t| t.id).collect()
}
