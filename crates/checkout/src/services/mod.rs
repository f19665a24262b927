//! Collaborator traits and in-memory implementations for checkout steps.
//!
//! Each trait is the narrow contract the orchestrator consumes from one
//! external service. The in-memory implementations back tests and the
//! bundled binary; they share state behind `Arc<RwLock<_>>`, so clones are
//! handles onto the same service and are safe to use from concurrent
//! orders.

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod email;
pub mod payment;
pub mod shipping;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use domain::DomainError;
use money::MoneyError;
use thiserror::Error;

pub use cart::{CartService, InMemoryCartService};
pub use catalog::{CatalogService, InMemoryCatalogService};
pub use currency::{CurrencyService, CurrencyTable, InMemoryCurrencyService};
pub use email::{
    EmailService, InMemoryEmailService, SentConfirmation, redact_address, render_confirmation,
};
pub use payment::{
    CardError, CardNetwork, ChargeResult, InMemoryPaymentService, PaymentService, validate_card,
};
pub use shipping::{InMemoryShippingService, ShipmentResult, ShippingService};

/// Errors reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The collaborator could not serve the request.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A currency code is not in the conversion table.
    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    /// The payment card was rejected.
    #[error("Card rejected: {0}")]
    Card(#[from] CardError),

    /// Money arithmetic failed inside the collaborator.
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The collaborator received or produced malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Money(e) => ServiceError::Money(e),
            other => ServiceError::InvalidData(other.to_string()),
        }
    }
}

// In-memory state stays usable after a panicking writer; every mutation
// leaves it consistent.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
