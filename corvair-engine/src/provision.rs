use chrono::{DateTime, Utc};
use uuid::Uuid;

use corvair_catalog::seat_map::{generate_seats, price_flight_seats};
use corvair_core::{
    Airport, Error, Flight, FlightStatus, Plane, PlaneStatus, Result,
};
use corvair_store::app_config::BusinessRules;
use corvair_store::MemoryStore;

/// Registers fleet and schedule records. These are administrative writes
/// owned by fleet management and scheduling; the engine hosts them so
/// flights exist to sell, and prices every new flight's seats exactly
/// once, here.
pub struct Provisioner {
    store: MemoryStore,
    rules: BusinessRules,
}

impl Provisioner {
    pub fn new(store: MemoryStore, rules: BusinessRules) -> Self {
        Self { store, rules }
    }

    pub async fn add_airport(&self, iata_code: &str, name: &str) -> Result<Airport> {
        let airport = Airport {
            id: Uuid::new_v4(),
            iata_code: iata_code.to_ascii_uppercase(),
            name: name.to_string(),
        };
        self.store.airports.insert(airport.clone()).await?;
        Ok(airport)
    }

    /// New planes arrive in storage with their cabin generated from the
    /// model's layout.
    pub async fn add_plane(&self, model_type: &str) -> Result<Plane> {
        let plane = Plane {
            id: Uuid::new_v4(),
            model_type: model_type.to_string(),
            status: PlaneStatus::Active,
            airport_id: None,
        };
        self.store.planes.insert(plane.clone()).await?;
        self.store
            .seats
            .insert_all(generate_seats(plane.id, model_type))
            .await?;
        tracing::info!(plane_id = %plane.id, model_type, "plane added to fleet");
        Ok(plane)
    }

    /// Schedule a flight and create its sellable seats, priced by cabin
    /// class off the base fare.
    pub async fn schedule_flight(
        &self,
        origin_airport_id: Uuid,
        destination_airport_id: Uuid,
        plane_id: Uuid,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
        base_price: i64,
    ) -> Result<Flight> {
        if arrival_time <= departure_time {
            return Err(Error::Validation(
                "flight duration must be positive".into(),
            ));
        }
        if base_price <= 0 {
            return Err(Error::Validation("base price must be positive".into()));
        }

        self.store.airports.get(origin_airport_id).await?;
        self.store.airports.get(destination_airport_id).await?;
        let plane = self.store.planes.get(plane_id).await?;
        if plane.status != PlaneStatus::Active {
            return Err(Error::Validation(format!(
                "cannot schedule on a {} plane",
                plane.status
            )));
        }

        let flight = Flight {
            id: Uuid::new_v4(),
            origin_airport_id,
            destination_airport_id,
            plane_id,
            departure_time,
            arrival_time,
            base_price,
            status: FlightStatus::Scheduled,
        };
        self.store.flights.insert(flight.clone()).await?;

        let templates = self.store.seats.list_by_plane(plane_id).await?;
        for seat in price_flight_seats(
            flight.id,
            base_price,
            &templates,
            &self.rules.class_multipliers,
        ) {
            self.store.flight_seats.insert(seat).await?;
        }

        tracing::info!(
            flight_id = %flight.id,
            %plane_id,
            seats = templates.len(),
            base_price,
            "flight scheduled"
        );
        Ok(flight)
    }
}
