//! Money error types.

use thiserror::Error;

/// Errors produced by money arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// An operand has out-of-range nanos or units and nanos of opposite sign.
    #[error("One of the specified money values is invalid")]
    InvalidValue,

    /// The operands do not share a (non-empty) currency code.
    #[error("Mismatching currency codes: {left:?} and {right:?}")]
    MismatchingCurrency { left: String, right: String },

    /// The units component left the `i64` range.
    #[error("Money value overflowed the units range")]
    Overflow,
}

/// Convenience type alias for money results.
pub type Result<T> = std::result::Result<T, MoneyError>;
