//! Checkout error types.

use common::UserId;
use domain::{DomainError, ProductId};
use thiserror::Error;

use crate::services::ServiceError;
use crate::steps;

/// The external services the checkout talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    Cart,
    Catalog,
    Currency,
    Shipping,
    Payment,
    Email,
}

impl Collaborator {
    /// Returns the collaborator name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collaborator::Cart => "cart",
            Collaborator::Catalog => "catalog",
            Collaborator::Currency => "currency",
            Collaborator::Shipping => "shipping",
            Collaborator::Payment => "payment",
            Collaborator::Email => "email",
        }
    }
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort an order placement.
///
/// No variant is returned once the order has been paid and shipped: cart
/// clearing and notification failures are logged, not surfaced.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request or a value derived from it broke an invariant.
    #[error("Validation failed during {step}: {source}")]
    Validation {
        step: &'static str,
        #[source]
        source: DomainError,
    },

    /// The cart could not be read.
    #[error("Cart failure for user {user_id}: {source}")]
    CartFailure {
        user_id: UserId,
        #[source]
        source: ServiceError,
    },

    /// A product could not be looked up or its price localized.
    #[error("Pricing failure for product {product_id} ({collaborator}): {source}")]
    PricingFailure {
        product_id: ProductId,
        collaborator: Collaborator,
        #[source]
        source: ServiceError,
    },

    /// Shipping could not be quoted or localized.
    #[error("Shipping quote failure ({collaborator}): {source}")]
    ShippingQuoteFailure {
        collaborator: Collaborator,
        #[source]
        source: ServiceError,
    },

    /// The card was not charged. Nothing was shipped.
    #[error("Payment failure: {source}")]
    PaymentFailure {
        #[source]
        source: ServiceError,
    },

    /// The order was paid for but could not be shipped. The charge stands.
    #[error("Shipping failure after payment: {source}")]
    ShippingFailure {
        #[source]
        source: ServiceError,
    },
}

impl CheckoutError {
    /// Returns the name of the step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            CheckoutError::Validation { step, .. } => *step,
            CheckoutError::CartFailure { .. } => steps::STEP_FETCH_CART,
            CheckoutError::PricingFailure { .. } => steps::STEP_PRICE_ITEMS,
            CheckoutError::ShippingQuoteFailure { .. } => steps::STEP_QUOTE_SHIPPING,
            CheckoutError::PaymentFailure { .. } => steps::STEP_CHARGE_PAYMENT,
            CheckoutError::ShippingFailure { .. } => steps::STEP_SHIP_ORDER,
        }
    }

    /// Returns the collaborator that failed, if the failure came from one.
    pub fn collaborator(&self) -> Option<Collaborator> {
        match self {
            CheckoutError::Validation { .. } => None,
            CheckoutError::CartFailure { .. } => Some(Collaborator::Cart),
            CheckoutError::PricingFailure { collaborator, .. }
            | CheckoutError::ShippingQuoteFailure { collaborator, .. } => Some(*collaborator),
            CheckoutError::PaymentFailure { .. } => Some(Collaborator::Payment),
            CheckoutError::ShippingFailure { .. } => Some(Collaborator::Shipping),
        }
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
