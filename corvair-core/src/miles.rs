//! Mile accrual math.
//!
//! A ticket earns a percentage of its seat price as loyalty miles, keyed
//! by cabin class. Award and deduction must use the same formula so a
//! booking followed by a cancellation nets to zero.

use crate::model::seat::SeatClass;

/// Percentage of the seat price converted to miles.
pub fn class_multiplier(class: SeatClass) -> i64 {
    match class {
        SeatClass::Economy => 5,
        SeatClass::PremiumEconomy => 10,
        SeatClass::Business => 15,
        SeatClass::First => 20,
    }
}

/// Miles earned for one seat: round(price * multiplier / 100).
pub fn miles_for(price: i64, class: SeatClass) -> i64 {
    ((price * class_multiplier(class)) as f64 / 100.0).round() as i64
}
