pub mod pricing;
pub mod seat_map;

pub use pricing::{seat_price, ClassMultipliers};
pub use seat_map::{layout_for_model, CabinLayout};
