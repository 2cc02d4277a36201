//! Pricing engine.
//!
//! Pure functions only: a seat count and a billing cycle go in, an exact
//! amount of money comes out. Nothing is cached.

pub mod engine;
pub mod money;
pub mod seats;

pub use engine::{
    ANNUAL_DISCOUNT_PERCENT, BillingCycle, MONTHLY_SEAT_RATE, ParseBillingCycleError,
    per_seat_rate, price,
};
pub use money::Money;
pub use seats::{MAX_SEATS, SeatCount, parse_seat_count};
