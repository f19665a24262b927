//! The `Money` value type and its arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::carry::carry;
use crate::error::{MoneyError, Result};

/// Smallest valid nanos component.
pub const NANOS_MIN: i32 = -999_999_999;

/// Largest valid nanos component.
pub const NANOS_MAX: i32 = 999_999_999;

/// Nanos per currency unit.
pub const NANOS_MOD: i32 = 1_000_000_000;

/// An amount of money in a specific currency.
///
/// The amount is `units + nanos / 10^9`. A value is *valid* when `nanos` lies
/// in `[-999_999_999, 999_999_999]` and `units` and `nanos` do not have
/// opposite signs. Invalid values can still be constructed (they arrive from
/// collaborators over the wire), but every arithmetic operation rejects them.
///
/// Equality is structural and includes the currency code; it does not imply
/// validity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Money {
    currency_code: String,
    units: i64,
    nanos: i32,
}

impl Money {
    /// Creates a money value from its raw components without validation.
    pub fn new(currency_code: impl Into<String>, units: i64, nanos: i32) -> Self {
        Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        }
    }

    /// Returns zero in the given currency.
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(currency_code, 0, 0)
    }

    /// Returns a whole number of units in the given currency.
    pub fn from_units(currency_code: impl Into<String>, units: i64) -> Self {
        Self::new(currency_code, units, 0)
    }

    /// Builds a money value from fractional components, normalizing them with
    /// [`carry`].
    ///
    /// ```
    /// use money::Money;
    ///
    /// let quote = Money::with_carry("USD", 8.99, 0.0);
    /// assert_eq!(quote, Money::new("USD", 8, 990_000_000));
    /// ```
    pub fn with_carry(currency_code: impl Into<String>, units: f64, nanos: f64) -> Self {
        let (units, nanos) = carry(units, nanos);
        Self::new(currency_code, units, nanos)
    }

    /// Returns the ISO currency code.
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Returns the whole units.
    pub fn units(&self) -> i64 {
        self.units
    }

    /// Returns the fractional part in billionths of a unit.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Returns true if nanos are in range and signs of units and nanos agree.
    pub fn is_valid(&self) -> bool {
        self.sign_matches() && (NANOS_MIN..=NANOS_MAX).contains(&self.nanos)
    }

    fn sign_matches(&self) -> bool {
        self.nanos == 0 || self.units == 0 || (self.nanos < 0) == (self.units < 0)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.nanos == 0
    }

    /// Returns true if the value is valid and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.is_valid() && (self.units > 0 || (self.units == 0 && self.nanos > 0))
    }

    /// Returns true if the value is valid and strictly negative.
    pub fn is_negative(&self) -> bool {
        self.is_valid() && (self.units < 0 || (self.units == 0 && self.nanos < 0))
    }

    /// Returns true if both values carry the same, non-empty currency code.
    pub fn same_currency(&self, other: &Money) -> bool {
        !self.currency_code.is_empty() && self.currency_code == other.currency_code
    }

    /// Returns the same amount with the sign flipped.
    pub fn negate(&self) -> Money {
        Money::new(self.currency_code.clone(), -self.units, -self.nanos)
    }

    /// Adds two values of the same currency.
    ///
    /// Fails with [`MoneyError::MismatchingCurrency`] when the currency codes
    /// differ (checked first, regardless of validity) and with
    /// [`MoneyError::InvalidValue`] when either operand is invalid. The result
    /// is normalized so that nanos stay in range and share the sign of units.
    pub fn sum(&self, other: &Money) -> Result<Money> {
        if !self.same_currency(other) {
            return Err(MoneyError::MismatchingCurrency {
                left: self.currency_code.clone(),
                right: other.currency_code.clone(),
            });
        }
        if !self.is_valid() || !other.is_valid() {
            return Err(MoneyError::InvalidValue);
        }

        let mut units = self
            .units
            .checked_add(other.units)
            .ok_or(MoneyError::Overflow)?;
        // Both operands are in range, so this cannot leave i32.
        let mut nanos = self.nanos + other.nanos;

        if units == 0 || nanos == 0 || (units > 0) == (nanos > 0) {
            units = units
                .checked_add(i64::from(nanos / NANOS_MOD))
                .ok_or(MoneyError::Overflow)?;
            nanos %= NANOS_MOD;
        } else if units > 0 {
            units -= 1;
            nanos += NANOS_MOD;
        } else {
            units += 1;
            nanos -= NANOS_MOD;
        }

        Ok(Money::new(self.currency_code.clone(), units, nanos))
    }

    /// Multiplies by a non-negative integer through repeated [`Money::sum`].
    ///
    /// The result is exactly what `n - 1` additional additions produce, so
    /// it carries the same normalization guarantees. `n == 0` yields zero in
    /// the same currency.
    pub fn multiply_slow(&self, n: u32) -> Result<Money> {
        if !self.is_valid() {
            return Err(MoneyError::InvalidValue);
        }
        if n == 0 {
            return Ok(Money::zero(self.currency_code.clone()));
        }

        let mut out = self.clone();
        for _ in 1..n {
            out = out.sum(self)?;
        }
        Ok(out)
    }
}

impl std::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 || self.nanos < 0 {
            "-"
        } else {
            ""
        };
        write!(
            f,
            "{} {}{}.{:02}",
            self.currency_code,
            sign,
            self.units.unsigned_abs(),
            self.nanos.unsigned_abs() / 10_000_000
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(units: i64, nanos: i32) -> Money {
        Money::new("USD", units, nanos)
    }

    #[test]
    fn test_validity() {
        assert!(usd(0, 0).is_valid());
        assert!(usd(5, 500_000_000).is_valid());
        assert!(usd(-5, -500_000_000).is_valid());
        assert!(usd(0, -1).is_valid());
        assert!(usd(-3, 0).is_valid());

        assert!(!usd(1, -1).is_valid());
        assert!(!usd(-1, 1).is_valid());
        assert!(!usd(0, NANOS_MOD).is_valid());
        assert!(!usd(0, -NANOS_MOD).is_valid());
    }

    #[test]
    fn test_sign_predicates() {
        assert!(usd(0, 0).is_zero());
        assert!(!usd(0, 1).is_zero());

        assert!(usd(1, 0).is_positive());
        assert!(usd(0, 1).is_positive());
        assert!(!usd(0, 0).is_positive());
        assert!(!usd(1, -1).is_positive());

        assert!(usd(-1, 0).is_negative());
        assert!(usd(0, -1).is_negative());
        assert!(!usd(0, 0).is_negative());
        assert!(!usd(-1, 1).is_negative());
    }

    #[test]
    fn test_same_currency_requires_a_code() {
        assert!(usd(1, 0).same_currency(&usd(2, 0)));
        assert!(!usd(1, 0).same_currency(&Money::new("EUR", 1, 0)));
        assert!(!Money::new("", 1, 0).same_currency(&Money::new("", 1, 0)));
    }

    #[test]
    fn test_equality_includes_currency_but_not_validity() {
        assert_eq!(usd(1, -1), usd(1, -1));
        assert_ne!(usd(1, 0), Money::new("EUR", 1, 0));
        assert_ne!(usd(1, 0), usd(1, 1));
    }

    #[test]
    fn test_negate() {
        assert_eq!(usd(3, 250_000_000).negate(), usd(-3, -250_000_000));
        assert_eq!(-usd(0, -5), usd(0, 5));
        assert_eq!(usd(0, 0).negate(), usd(0, 0));
    }

    #[test]
    fn test_sum_simple() {
        assert_eq!(usd(1, 0).sum(&usd(2, 0)).unwrap(), usd(3, 0));
        assert_eq!(
            usd(10, 500_000_000).sum(&usd(0, 250_000_000)).unwrap(),
            usd(10, 750_000_000)
        );
    }

    #[test]
    fn test_sum_carries_nanos_into_units() {
        assert_eq!(
            usd(1, 600_000_000).sum(&usd(2, 700_000_000)).unwrap(),
            usd(4, 300_000_000)
        );
        assert_eq!(
            usd(-1, -600_000_000).sum(&usd(-2, -700_000_000)).unwrap(),
            usd(-4, -300_000_000)
        );
        assert_eq!(
            usd(0, 999_999_999).sum(&usd(0, 1)).unwrap(),
            usd(1, 0)
        );
    }

    #[test]
    fn test_sum_with_zero_units_keeps_sign_consistent() {
        assert_eq!(
            usd(0, 200_000_000).sum(&usd(0, 300_000_000)).unwrap(),
            usd(0, 500_000_000)
        );
        assert_eq!(
            usd(0, -600_000_000).sum(&usd(0, -900_000_000)).unwrap(),
            usd(-1, -500_000_000)
        );
    }

    #[test]
    fn test_sum_borrows_across_signs() {
        let result = usd(5, 0).sum(&usd(-2, -500_000_000)).unwrap();
        assert_eq!(result, usd(2, 500_000_000));
        assert!(result.is_valid());

        let result = usd(-5, 0).sum(&usd(2, 500_000_000)).unwrap();
        assert_eq!(result, usd(-2, -500_000_000));
        assert!(result.is_valid());

        let result = usd(1, 0).sum(&usd(-1, 0)).unwrap();
        assert!(result.is_zero());
    }

    #[test]
    fn test_sum_rejects_invalid_values() {
        assert_eq!(usd(1, -1).sum(&usd(1, 0)), Err(MoneyError::InvalidValue));
        assert_eq!(
            usd(1, 0).sum(&usd(0, NANOS_MOD)),
            Err(MoneyError::InvalidValue)
        );
    }

    #[test]
    fn test_sum_rejects_mismatching_currency_before_validity() {
        let err = usd(1, -1).sum(&Money::new("EUR", 1, -1)).unwrap_err();
        assert!(matches!(err, MoneyError::MismatchingCurrency { .. }));

        let err = Money::zero("").sum(&Money::zero("")).unwrap_err();
        assert!(matches!(err, MoneyError::MismatchingCurrency { .. }));
    }

    #[test]
    fn test_sum_overflow() {
        assert_eq!(
            usd(i64::MAX, 0).sum(&usd(1, 0)),
            Err(MoneyError::Overflow)
        );
    }

    #[test]
    fn test_multiply_slow() {
        assert_eq!(usd(10, 0).multiply_slow(2).unwrap(), usd(20, 0));
        assert_eq!(
            usd(0, 990_000_000).multiply_slow(3).unwrap(),
            usd(2, 970_000_000)
        );
        assert_eq!(usd(7, 5).multiply_slow(1).unwrap(), usd(7, 5));
        assert_eq!(usd(7, 5).multiply_slow(0).unwrap(), Money::zero("USD"));
    }

    #[test]
    fn test_multiply_slow_rejects_invalid_value() {
        assert_eq!(usd(1, -1).multiply_slow(3), Err(MoneyError::InvalidValue));
    }

    #[test]
    fn test_with_carry() {
        assert_eq!(Money::with_carry("USD", 8.99, 0.0), usd(8, 990_000_000));
        assert_eq!(Money::with_carry("JPY", 1.5, 600_000_000.0), Money::new("JPY", 2, 100_000_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(usd(28, 990_000_000).to_string(), "USD 28.99");
        assert_eq!(usd(1, 0).to_string(), "USD 1.00");
        assert_eq!(usd(0, 50_000_000).to_string(), "USD 0.05");
        assert_eq!(usd(-12, -340_000_000).to_string(), "USD -12.34");
        assert_eq!(usd(0, -500_000_000).to_string(), "USD -0.50");
    }

    #[test]
    fn test_serialization() {
        let money = usd(28, 990_000_000);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(
            json,
            r#"{"currency_code":"USD","units":28,"nanos":990000000}"#
        );
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(money, deserialized);
    }
}
