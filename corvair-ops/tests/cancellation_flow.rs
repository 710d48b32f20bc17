mod common;

use common::{book_seats, world};
use corvair_core::{
    Availability, Error, PaymentMethod, PaymentStatus, TicketStatus,
};
use corvair_booking::{BookingRequest, SeatRequest};

#[tokio::test]
async fn cancelling_a_booked_ticket_reverses_everything() {
    let w = world().await;
    let tickets = book_seats(&w, w.flight_id, PaymentMethod::Card, &["1A"]).await;

    // Business seat at 1000 earned 150 miles
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 150);

    let summary = w.workflow.cancel(tickets[0]).await.unwrap();
    assert_eq!(summary.status, TicketStatus::Cancelled);
    assert_eq!(summary.refund_amount, Some(1000));

    let seat = w.store.flight_seats.get(w.flight_id, "1A").await.unwrap();
    assert_eq!(seat.availability, Availability::Available);

    // Earned miles clawed back
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 0);

    // Purchase plus refund on record, refund negative
    let payments = w.store.payments.list_by_user(w.user_id).await.unwrap();
    assert_eq!(payments.len(), 2);
    let refund = payments
        .iter()
        .find(|p| p.status == PaymentStatus::Refunded)
        .unwrap();
    assert_eq!(refund.total_amount, -1000);
    assert_eq!(refund.method, PaymentMethod::Card);
}

#[tokio::test]
async fn second_cancellation_of_same_ticket_fails() {
    let w = world().await;
    let tickets = book_seats(&w, w.flight_id, PaymentMethod::Card, &["1A"]).await;

    w.workflow.cancel(tickets[0]).await.unwrap();
    let err = w.workflow.cancel(tickets[0]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidStateTransition { .. }));

    // Only one refund was written
    let payments = w.store.payments.list_by_user(w.user_id).await.unwrap();
    assert_eq!(
        payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Refunded)
            .count(),
        1
    );
}

#[tokio::test]
async fn checked_in_ticket_cannot_be_cancelled() {
    let w = world().await;
    let tickets = book_seats(&w, w.flight_id, PaymentMethod::Card, &["1A"]).await;

    w.store
        .tickets
        .set_status(tickets[0], TicketStatus::CheckedIn)
        .await
        .unwrap();

    let err = w.workflow.cancel(tickets[0]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidStateTransition { .. }));

    // Seat stays sold
    let seat = w.store.flight_seats.get(w.flight_id, "1A").await.unwrap();
    assert_eq!(seat.availability, Availability::Sold);
}

#[tokio::test]
async fn refund_covers_flagged_extras() {
    let w = world().await;
    let receipt = w
        .booking
        .book(BookingRequest {
            user_id: w.user_id,
            method: PaymentMethod::Card,
            seats: vec![SeatRequest::new(w.flight_id, "10C").with_extras(true, true)],
        })
        .await
        .unwrap();

    // 500 seat + 150 baggage + 75 meal
    assert_eq!(receipt.total_amount, 725);

    let summary = w.workflow.cancel(receipt.tickets[0].id).await.unwrap();
    assert_eq!(summary.refund_amount, Some(725));

    let payments = w.store.payments.list_by_user(w.user_id).await.unwrap();
    let refund = payments
        .iter()
        .find(|p| p.status == PaymentStatus::Refunded)
        .unwrap();
    assert_eq!(refund.total_amount, -725);
}

#[tokio::test]
async fn mile_purchase_refund_restores_the_balance() {
    let w = world().await;
    w.store.users.credit_miles(w.user_id, 2000).await.unwrap();

    // 500 debit, 25 earned on the economy seat
    let tickets = book_seats(&w, w.flight_id, PaymentMethod::Mile, &["10C"]).await;
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 1525);

    // Deducts the 25 earned, credits the 500 refund
    w.workflow.cancel(tickets[0]).await.unwrap();
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 2000);
}

#[tokio::test]
async fn mile_clawback_clamps_at_zero() {
    let w = world().await;
    let tickets = book_seats(&w, w.flight_id, PaymentMethod::Card, &["1A"]).await;

    // Spend most of the earned miles elsewhere before cancelling
    w.store
        .users
        .deduct_miles_clamped(w.user_id, 100)
        .await
        .unwrap();
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 50);

    w.workflow.cancel(tickets[0]).await.unwrap();
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 0);
}

#[tokio::test]
async fn pending_cash_ticket_can_be_cancelled() {
    let w = world().await;
    let tickets = book_seats(&w, w.flight_id, PaymentMethod::Cash, &["10D"]).await;

    let seat = w.store.flight_seats.get(w.flight_id, "10D").await.unwrap();
    assert_eq!(seat.availability, Availability::Reserved);

    let summary = w.workflow.cancel(tickets[0]).await.unwrap();
    assert_eq!(summary.status, TicketStatus::Cancelled);

    let seat = w.store.flight_seats.get(w.flight_id, "10D").await.unwrap();
    assert_eq!(seat.availability, Availability::Available);

    // Cash never earned miles, so none are clawed back
    assert_eq!(w.store.users.get(w.user_id).await.unwrap().mile, 0);
}

#[tokio::test]
async fn cancelling_unknown_ticket_is_not_found() {
    let w = world().await;
    let err = w.workflow.cancel(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
