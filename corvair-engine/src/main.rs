use chrono::{Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corvair_booking::SeatRequest;
use corvair_core::{CreditCard, User};
use corvair_engine::{Provisioner, ReservationApi};
use corvair_store::app_config::Config;
use corvair_store::MemoryStore;

/// Smoke run: seed a small operation, sell a booking, cancel it, then
/// ground the plane. Exercises the same paths a transport layer would.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corvair=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "no config found, using defaults");
            Config {
                business_rules: Default::default(),
            }
        }
    };
    let rules = config.business_rules;

    let store = MemoryStore::new();
    let provisioner = Provisioner::new(store.clone(), rules.clone());
    let api = ReservationApi::new(store.clone(), rules);

    let ist = provisioner.add_airport("IST", "Istanbul").await?;
    let esb = provisioner.add_airport("ESB", "Ankara").await?;
    let plane = provisioner.add_plane("737-800").await?;
    api.deploy_plane(plane.id, ist.id).await?;

    let departure = Utc::now() + Duration::hours(6);
    let flight = provisioner
        .schedule_flight(ist.id, esb.id, plane.id, departure, departure + Duration::hours(1), 1000)
        .await?;

    let user = User::new("Derya", "Tan", "derya@example.com");
    let user_id = user.id;
    store.users.insert(user).await?;
    store
        .cards
        .insert(CreditCard {
            user_id,
            card_num: "4111111111111111".into(),
            holder_name: "Derya Tan".into(),
            expiry: "12/29".into(),
        })
        .await?;

    let receipt = api
        .create_booking(
            user_id,
            "card",
            vec![
                SeatRequest::new(flight.id, "1A"),
                SeatRequest::new(flight.id, "10C").with_extras(true, false),
            ],
        )
        .await?;
    tracing::info!(
        payment_id = %receipt.payment.id,
        total = receipt.total_amount,
        miles = receipt.miles_awarded,
        "booked two seats"
    );

    let summary = api.cancel_ticket(receipt.tickets[1].id).await?;
    tracing::info!(refund = ?summary.refund_amount, "cancelled one ticket");

    let report = api.report_plane_malfunction(plane.id, false).await?;
    tracing::info!(
        flights_cancelled = report.flights_cancelled,
        tickets_cancelled = report.tickets_cancelled,
        tickets_failed = report.tickets_failed,
        "plane grounded, cascade complete"
    );

    Ok(())
}
