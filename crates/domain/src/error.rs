//! Domain error types.

use money::MoneyError;
use thiserror::Error;

use crate::order::ProductId;

/// Errors raised when a domain value breaks one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A cart item had a zero quantity.
    #[error("Invalid quantity {quantity} for product {product_id} (must be greater than 0)")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// Money arithmetic failed.
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
