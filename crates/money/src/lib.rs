//! Exact decimal money arithmetic.
//!
//! A [`Money`] value is a `(units, nanos, currency_code)` triple where
//! `nanos` counts billionths of a unit. All arithmetic is integer arithmetic
//! on that scale; floating point only appears once, in [`carry`], when a
//! fractional rate has to be expressed as `(units, nanos)`.

pub mod carry;
pub mod error;
pub mod money;

pub use carry::carry;
pub use error::{MoneyError, Result};
pub use money::{Money, NANOS_MAX, NANOS_MIN, NANOS_MOD};
