//! Fuel consumption and cost calculation.

pub mod calculator;
pub mod gauge;
pub mod input;
pub mod method;

pub use calculator::*;
pub use gauge::*;
pub use input::*;
pub use method::*;
