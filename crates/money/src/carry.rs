//! Normalization of fractional amounts into `(units, nanos)`.

use crate::money::NANOS_MOD;

const FRACTION_SIZE: f64 = NANOS_MOD as f64;

/// Expresses `units + nanos / 10^9` as whole units plus nanos.
///
/// The fractional part of `units` is moved into nanos at 10^9 per unit,
/// whole units are carried out of the combined nanos, and the remainder is
/// rounded to the nearest nano. The returned nanos are always within
/// `[-999_999_999, 999_999_999]` and never have the opposite sign of the
/// returned units.
///
/// This is the only place floating point enters money handling: callers
/// derive a value from a rate (a shipping rate, an exchange rate) and hand
/// the raw product to `carry`; everything after works on integers.
///
/// ```
/// assert_eq!(money::carry(8.99, 0.0), (8, 990_000_000));
/// assert_eq!(money::carry(-1.5, 0.0), (-1, -500_000_000));
/// ```
pub fn carry(units: f64, nanos: f64) -> (i64, i32) {
    let whole = units.trunc();
    let fraction = (units - whole) * FRACTION_SIZE + nanos;
    let overflow = (fraction / FRACTION_SIZE).trunc();

    let mut units = (whole + overflow) as i64;
    let mut nanos = (fraction - overflow * FRACTION_SIZE).round() as i64;

    // Rounding may land exactly on a whole unit.
    let modulus = i64::from(NANOS_MOD);
    units = units.saturating_add(nanos / modulus);
    nanos %= modulus;

    if units > 0 && nanos < 0 {
        units -= 1;
        nanos += modulus;
    } else if units < 0 && nanos > 0 {
        units += 1;
        nanos -= modulus;
    }

    (units, nanos as i32)
}
