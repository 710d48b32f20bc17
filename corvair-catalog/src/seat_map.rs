//! Cabin layouts and seat generation.
//!
//! A plane model maps to a fixed cabin layout; the layout expands into
//! seat templates when the plane enters the fleet, and into priced
//! flight seats when a flight is scheduled on it.

use corvair_core::{FlightSeat, Seat, SeatClass, SeatStatus};
use uuid::Uuid;

use crate::pricing::{seat_price, ClassMultipliers};

/// Row/column shape of one aircraft model's cabin. Business rows sit at
/// the front; everything behind them is economy.
#[derive(Debug, Clone)]
pub struct CabinLayout {
    pub total_rows: u32,
    pub business_rows: u32,
    pub columns: &'static str,
}

impl CabinLayout {
    pub fn capacity(&self) -> usize {
        self.total_rows as usize * self.columns.len()
    }
}

/// Layout by model designator. Unknown models fall back to a small 2+2
/// regional shape.
pub fn layout_for_model(model_type: &str) -> CabinLayout {
    let model = model_type.to_ascii_uppercase();
    if model.contains("737") {
        CabinLayout {
            total_rows: 30,
            business_rows: 5,
            columns: "ABCDEF",
        }
    } else if model.contains("777") {
        CabinLayout {
            total_rows: 45,
            business_rows: 8,
            columns: "ABCDEFGHIJ",
        }
    } else if model.contains("A320") {
        CabinLayout {
            total_rows: 28,
            business_rows: 0,
            columns: "ABCDEF",
        }
    } else {
        CabinLayout {
            total_rows: 20,
            business_rows: 2,
            columns: "ACDF",
        }
    }
}

/// Expand a plane's cabin layout into seat templates. Seat numbers are
/// row + column ("1A", "20F"); rows start at 1.
pub fn generate_seats(plane_id: Uuid, model_type: &str) -> Vec<Seat> {
    let layout = layout_for_model(model_type);
    let mut seats = Vec::with_capacity(layout.capacity());

    for row in 1..=layout.total_rows {
        for col in layout.columns.chars() {
            let class = if row <= layout.business_rows {
                SeatClass::Business
            } else {
                SeatClass::Economy
            };
            seats.push(Seat {
                plane_id,
                seat_number: format!("{row}{col}"),
                class,
                status: SeatStatus::Active,
            });
        }
    }

    seats
}

/// Price a flight's sellable seats from the plane's templates. Called
/// once at scheduling time; the resulting prices are fixed for the life
/// of the flight.
pub fn price_flight_seats(
    flight_id: Uuid,
    base_price: i64,
    templates: &[Seat],
    multipliers: &ClassMultipliers,
) -> Vec<FlightSeat> {
    templates
        .iter()
        .map(|seat| {
            FlightSeat::new(
                flight_id,
                seat.seat_number.clone(),
                seat_price(base_price, seat.class, multipliers),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowbody_layout() {
        let layout = layout_for_model("Boeing 737-800");
        assert_eq!(layout.total_rows, 30);
        assert_eq!(layout.business_rows, 5);
        assert_eq!(layout.capacity(), 180);
    }

    #[test]
    fn unknown_model_gets_regional_layout() {
        let layout = layout_for_model("E190");
        assert_eq!(layout.columns, "ACDF");
        assert_eq!(layout.capacity(), 80);
    }

    #[test]
    fn front_rows_are_business() {
        let plane_id = Uuid::new_v4();
        let seats = generate_seats(plane_id, "737");

        let first_row: Vec<_> = seats.iter().filter(|s| s.seat_number.starts_with('1')).collect();
        assert!(first_row.iter().any(|s| s.seat_number == "1A"));

        let one_a = seats.iter().find(|s| s.seat_number == "1A").unwrap();
        assert_eq!(one_a.class, SeatClass::Business);

        let thirty_f = seats.iter().find(|s| s.seat_number == "30F").unwrap();
        assert_eq!(thirty_f.class, SeatClass::Economy);
    }

    #[test]
    fn a320_is_all_economy() {
        let seats = generate_seats(Uuid::new_v4(), "A320");
        assert!(seats.iter().all(|s| s.class == SeatClass::Economy));
        assert_eq!(seats.len(), 168);
    }

    #[test]
    fn flight_seats_priced_by_class() {
        let plane_id = Uuid::new_v4();
        let flight_id = Uuid::new_v4();
        let templates = generate_seats(plane_id, "737");
        let priced = price_flight_seats(
            flight_id,
            1000,
            &templates,
            &ClassMultipliers::default(),
        );

        assert_eq!(priced.len(), templates.len());
        let business = priced.iter().find(|s| s.seat_number == "1A").unwrap();
        let economy = priced.iter().find(|s| s.seat_number == "30F").unwrap();
        assert_eq!(business.price, 1500);
        assert_eq!(economy.price, 1000);
        assert!(priced.iter().all(|s| s.version == 0));
    }
}
