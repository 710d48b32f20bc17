use chrono::{Duration, Utc};
use uuid::Uuid;

use corvair_booking::SeatRequest;
use corvair_core::{
    Availability, CreditCard, Error, PaymentStatus, SeatClass, TicketStatus, User,
};
use corvair_engine::{Provisioner, ReservationApi};
use corvair_store::app_config::BusinessRules;
use corvair_store::MemoryStore;

struct World {
    api: ReservationApi,
    store: MemoryStore,
    user_id: Uuid,
    origin_id: Uuid,
    plane_id: Uuid,
    flight_id: Uuid,
}

async fn world() -> World {
    let store = MemoryStore::new();
    let rules = BusinessRules::default();
    let provisioner = Provisioner::new(store.clone(), rules.clone());
    let api = ReservationApi::new(store.clone(), rules);

    let origin = provisioner.add_airport("ist", "Istanbul").await.unwrap();
    assert_eq!(origin.iata_code, "IST");
    let destination = provisioner.add_airport("ESB", "Ankara").await.unwrap();
    let plane = provisioner.add_plane("737-800").await.unwrap();
    api.deploy_plane(plane.id, origin.id).await.unwrap();

    let departure = Utc::now() + Duration::hours(4);
    let flight = provisioner
        .schedule_flight(
            origin.id,
            destination.id,
            plane.id,
            departure,
            departure + Duration::minutes(70),
            1000,
        )
        .await
        .unwrap();

    let user = User::new("Derya", "Tan", "derya@example.com");
    let user_id = user.id;
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

    World {
        api,
        store,
        user_id,
        origin_id: origin.id,
        plane_id: plane.id,
        flight_id: flight.id,
    }
}

#[tokio::test]
async fn booking_through_the_boundary_creates_payment_and_tickets() {
    let w = world().await;
    let receipt = w
        .api
        .create_booking(
            w.user_id,
            "card",
            vec![SeatRequest::new(w.flight_id, "1A")],
        )
        .await
        .unwrap();

    // 737 row 1 is business; base 1000 * 1.5 class multiplier
    assert_eq!(receipt.total_amount, 1500);
    assert_eq!(receipt.payment.status, PaymentStatus::Paid);
    assert_eq!(receipt.miles_awarded, 225);

    let tickets = w.api.user_tickets(w.user_id).await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].status, TicketStatus::Booked);
}

#[tokio::test]
async fn unknown_payment_method_is_a_validation_error() {
    let w = world().await;
    let err = w
        .api
        .create_booking(
            w.user_id,
            "wire",
            vec![SeatRequest::new(w.flight_id, "1A")],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn checked_in_ticket_refuses_cancellation() {
    let w = world().await;
    let receipt = w
        .api
        .create_booking(
            w.user_id,
            "card",
            vec![SeatRequest::new(w.flight_id, "6B")],
        )
        .await
        .unwrap();

    let summary = w.api.check_in(receipt.tickets[0].id).await.unwrap();
    assert_eq!(summary.status, TicketStatus::CheckedIn);

    let err = w.api.cancel_ticket(receipt.tickets[0].id).await.unwrap_err();
    assert!(matches!(err, Error::InvalidStateTransition { .. }));

    // Check-in is not repeatable either
    let err = w.api.check_in(receipt.tickets[0].id).await.unwrap_err();
    assert!(matches!(err, Error::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn cancel_ticket_frees_the_seat_for_rebooking() {
    let w = world().await;
    let receipt = w
        .api
        .create_booking(
            w.user_id,
            "card",
            vec![SeatRequest::new(w.flight_id, "12C")],
        )
        .await
        .unwrap();

    w.api.cancel_ticket(receipt.tickets[0].id).await.unwrap();

    // The same seat sells again to a fresh booking
    let again = w
        .api
        .create_booking(
            w.user_id,
            "card",
            vec![SeatRequest::new(w.flight_id, "12C")],
        )
        .await
        .unwrap();
    assert_eq!(again.tickets[0].seat_number, "12C");
}

#[tokio::test]
async fn flight_seat_map_joins_template_and_availability() {
    let w = world().await;
    w.api
        .create_booking(w.user_id, "cash", vec![SeatRequest::new(w.flight_id, "3C")])
        .await
        .unwrap();

    let map = w.api.flight_seat_map(w.flight_id).await.unwrap();
    // Full 737 cabin: 30 rows of 6
    assert_eq!(map.len(), 180);

    let held = map.iter().find(|s| s.seat_number == "3C").unwrap();
    assert_eq!(held.availability, Availability::Reserved);
    assert_eq!(held.class, Some(SeatClass::Business));
    assert_eq!(held.price, 1500);

    let economy = map.iter().find(|s| s.seat_number == "20F").unwrap();
    assert_eq!(economy.availability, Availability::Available);
    assert_eq!(economy.class, Some(SeatClass::Economy));
    assert_eq!(economy.price, 1000);
}

#[tokio::test]
async fn cancelling_the_flight_reports_through_the_boundary() {
    let w = world().await;
    w.api
        .create_booking(
            w.user_id,
            "card",
            vec![
                SeatRequest::new(w.flight_id, "10A"),
                SeatRequest::new(w.flight_id, "10B"),
            ],
        )
        .await
        .unwrap();

    let report = w.api.cancel_flight(w.flight_id).await.unwrap();
    assert_eq!(report.flights_cancelled, 1);
    assert_eq!(report.tickets_cancelled, 2);
    assert_eq!(report.tickets_failed, 0);

    // Refund recorded per the one payment's tickets
    let payments = w.api.user_payments(w.user_id).await.unwrap();
    assert_eq!(
        payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Refunded)
            .count(),
        2
    );
}

#[tokio::test]
async fn non_positive_duration_is_rejected() {
    let w = world().await;
    let provisioner = Provisioner::new(w.store.clone(), BusinessRules::default());

    let departure = Utc::now() + Duration::hours(4);
    let err = provisioner
        .schedule_flight(
            w.origin_id,
            w.origin_id,
            w.plane_id,
            departure,
            departure,
            1000,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn grounded_plane_cannot_host_new_flights() {
    let w = world().await;
    let report = w.api.report_plane_malfunction(w.plane_id, false).await.unwrap();
    assert_eq!(report.flights_cancelled, 1);

    let provisioner = Provisioner::new(w.store.clone(), BusinessRules::default());
    let departure = Utc::now() + Duration::hours(24);
    let err = provisioner
        .schedule_flight(
            w.origin_id,
            w.origin_id,
            w.plane_id,
            departure,
            departure + Duration::hours(1),
            800,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // Reactivation puts it back in rotation
    w.api.reactivate_plane(w.plane_id).await.unwrap();
    let flight = provisioner
        .schedule_flight(
            w.origin_id,
            w.origin_id,
            w.plane_id,
            departure,
            departure + Duration::hours(1),
            800,
        )
        .await
        .unwrap();
    assert_eq!(flight.base_price, 800);
}
