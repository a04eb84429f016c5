//! Text-level parsers shared by every extraction tier.

pub mod duration;
pub mod ingredient;
pub mod quantity;
pub mod units;

pub use duration::{parse_duration, parse_duration_value};
pub use ingredient::{format_ingredient, parse_ingredient};
pub use quantity::parse_fraction;
