use corvair_core::SeatClass;
use serde::{Deserialize, Serialize};

/// Per-class price multipliers applied to a flight's base fare exactly
/// once, when its seats are created. Seat prices never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMultipliers {
    pub economy: f64,
    pub premium_economy: f64,
    pub business: f64,
    pub first: f64,
}

impl Default for ClassMultipliers {
    fn default() -> Self {
        Self {
            economy: 1.0,
            premium_economy: 1.25,
            business: 1.5,
            first: 2.0,
        }
    }
}

impl ClassMultipliers {
    pub fn for_class(&self, class: SeatClass) -> f64 {
        match class {
            SeatClass::Economy => self.economy,
            SeatClass::PremiumEconomy => self.premium_economy,
            SeatClass::Business => self.business,
            SeatClass::First => self.first,
        }
    }
}

/// Price of one seat given the flight's base fare, rounded to a whole
/// currency unit.
pub fn seat_price(base_price: i64, class: SeatClass, multipliers: &ClassMultipliers) -> i64 {
    (base_price as f64 * multipliers.for_class(class)).round() as i64
}
